use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use snafu::{Snafu, OptionExt};

use crate::device_class::{DeviceClass, DeviceClassRef};

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[snafu(display("device class {:?} not found", name))]
    DeviceClassNotFound { name: String },
    #[snafu(display("no device class uses volume group {:?}", volume_group))]
    VolumeGroupNotFound { volume_group: String },
}

impl LookupError {
    /// Every lookup failure means "not configured"; callers use this to fall
    /// back to the default class instead of failing the request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::DeviceClassNotFound { .. } | LookupError::VolumeGroupNotFound { .. })
    }
}

/// Read-only index over a validated list of device classes.
///
/// Built once at startup and never mutated, so it can be shared between
/// threads as-is.
#[derive(Debug, Clone)]
pub struct DeviceClassManager {
    classes: Vec<DeviceClass>,
    by_name: BTreeMap<String, usize>,
    by_volume_group: BTreeMap<String, usize>,
    default_class: usize,
    default_spare_gb: u64,
}

impl DeviceClassManager {
    /// `classes` must have passed [`validate`](crate::validate). In
    /// particular exactly one of them is the default; with none, the first
    /// class stands in.
    pub fn new(classes: Vec<DeviceClass>, default_spare_gb: u64) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_volume_group = BTreeMap::new();
        let mut default_class = None;

        for (i, dc) in classes.iter().enumerate() {
            by_name.insert(dc.name.clone(), i);
            // several classes may share a volume group, the first one declared owns the reverse lookup
            by_volume_group.entry(dc.volume_group.clone()).or_insert(i);
            if dc.default && default_class.is_none() {
                default_class = Some(i);
            }
            tracing::debug!(name = %dc.name, volume_group = %dc.volume_group, default = dc.default, "device class registered");
        }

        Self {
            classes,
            by_name,
            by_volume_group,
            default_class: default_class.unwrap_or(0),
            default_spare_gb,
        }
    }

    fn get(&self, index: usize) -> DeviceClassRef<'_> {
        DeviceClassRef { class: &self.classes[index], default_spare_gb: self.default_spare_gb }
    }

    pub fn device_class(&self, name: &str) -> Result<DeviceClassRef<'_>, LookupError> {
        let index = *self.by_name.get(name).context(DeviceClassNotFoundSnafu { name })?;
        Ok(self.get(index))
    }

    pub fn find_device_class_by_vg_name(&self, volume_group: &str) -> Result<DeviceClassRef<'_>, LookupError> {
        let index = *self.by_volume_group.get(volume_group).context(VolumeGroupNotFoundSnafu { volume_group })?;
        Ok(self.get(index))
    }

    pub fn default_device_class(&self) -> DeviceClassRef<'_> {
        self.get(self.default_class)
    }

    /// All classes in declaration order.
    pub fn device_classes(&self) -> impl Iterator<Item = DeviceClassRef<'_>> + '_ {
        (0..self.classes.len()).map(move |i| self.get(i))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn default_spare_gb(&self) -> u64 {
        self.default_spare_gb
    }
}
