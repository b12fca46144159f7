use alloc::string::{String, ToString};
use alloc::vec::Vec;
use acid_io::Read;
use serde::Deserialize;
use snafu::{ResultExt, ensure};

use crate::device_class::{DEFAULT_SPARE_GB, DeviceClass, MAX_SPARE_GB};
use crate::manager::DeviceClassManager;
use crate::validate::{DefaultSpareOverflowSnafu, ValidationError, validate};
use crate::{Error, InvalidSnafu, IoSnafu};

use self::deserialize::ConfigElements;
use self::named_groups::NamedGroups;

pub(crate) mod deserialize;
mod named_groups;

pub const DEFAULT_SOCKET_NAME: &str = "/run/topolvm/lvmd.sock";

fn default_socket_name() -> String {
    DEFAULT_SOCKET_NAME.into()
}
fn default_spare_gb() -> u64 {
    DEFAULT_SPARE_GB
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
struct ConfigRoot {
    #[serde(default = "default_socket_name")]
    socket_name: String,
    #[serde(default = "default_spare_gb")]
    spare_gb: u64,
    #[serde(default)]
    device_classes: NamedGroups<String, DeviceClassDesc>,
}
#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
struct DeviceClassDesc {
    volume_group: String,
    #[serde(default)]
    default: bool,
    spare_gb: Option<u64>,
    stripe: Option<u32>,
    #[serde(default)]
    stripe_size: String,
    #[serde(default)]
    lvcreate_options: Vec<String>,
}
impl DeviceClassDesc {
    fn into_device_class(self, name: String) -> DeviceClass {
        DeviceClass {
            name,
            volume_group: self.volume_group,
            default: self.default,
            spare_gb: self.spare_gb,
            stripe: self.stripe,
            stripe_size: self.stripe_size,
            lvcreate_options: self.lvcreate_options,
        }
    }
}

/// Daemon configuration, read from a file in lvm.conf syntax:
///
/// ```text
/// socket_name = "/run/topolvm/lvmd.sock"
/// spare_gb = 10
/// device_classes {
///     ssd {
///         volume_group = "ssd-vg"
///         default = 1
///         stripe = 2
///         stripe_size = "4m"
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub socket_name: String,
    /// Spare reserve for classes that do not set their own.
    pub spare_gb: u64,
    /// In declaration order.
    pub device_classes: Vec<DeviceClass>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let (rest, elements) = ConfigElements::parse(text).map_err(|e| Error::ParseError { error: e.to_string() })?;
        if !rest.is_empty() {
            let consumed = &text[..text.len() - rest.len()];
            let line = consumed.matches('\n').count() + 1;
            return Err(Error::ParseError { error: alloc::format!("unexpected input on line {}", line) });
        }
        tracing::trace!(?elements);

        let root = ConfigRoot::deserialize(&elements).map_err(|e| Error::Deserialize { error: e.to_string() })?;
        tracing::trace!(?root);

        Ok(Self {
            socket_name: root.socket_name,
            spare_gb: root.spare_gb,
            device_classes: root.device_classes.0.into_iter().map(|(name, desc)| desc.into_device_class(name)).collect(),
        })
    }

    pub fn load<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text).context(IoSnafu)?;
        Self::parse(&text)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.device_classes)?;
        ensure!(self.spare_gb <= MAX_SPARE_GB, DefaultSpareOverflowSnafu { spare_gb: self.spare_gb });
        Ok(())
    }

    /// Validates the configuration and builds the lookup index the rest of
    /// the daemon works with. An error here must stop the daemon.
    pub fn into_manager(self) -> Result<DeviceClassManager, Error> {
        self.validate().context(InvalidSnafu)?;
        tracing::debug!(socket_name = %self.socket_name, spare_gb = self.spare_gb, "building device class manager");
        Ok(DeviceClassManager::new(self.device_classes, self.spare_gb))
    }
}
