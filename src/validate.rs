use alloc::collections::BTreeSet;
use alloc::string::String;
use snafu::{Snafu, ResultExt, ensure};

use crate::device_class::{DeviceClass, MAX_SPARE_GB};
use crate::quantity::{StripeSize, StripeSizeError, is_valid_device_class_name};

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum ValidationError {
    #[snafu(display("at least one device class is required"))]
    Empty,
    #[snafu(display("device class name {:?} is invalid: use ASCII letters, digits and single '-' separators", name))]
    InvalidName { name: String },
    #[snafu(display("duplicate device class name {:?}", name))]
    DuplicateName { name: String },
    #[snafu(display("exactly one device class must be the default, found {}", count))]
    DefaultCount { count: usize },
    #[snafu(display("device class {:?} has an invalid stripe_size {:?}", name, stripe_size))]
    InvalidStripeSize { name: String, stripe_size: String, source: StripeSizeError },
    #[snafu(display("device class {:?} reserves {} GB, which overflows when converted to bytes", name, spare_gb))]
    SpareOverflow { name: String, spare_gb: u64 },
    #[snafu(display("default spare of {} GB overflows when converted to bytes", spare_gb))]
    DefaultSpareOverflow { spare_gb: u64 },
}

/// Checks a configured list of device classes before it is handed to
/// [`DeviceClassManager::new`](crate::DeviceClassManager::new).
///
/// Rules are checked in order and the first failure is returned:
/// non-empty, name syntax, unique names, exactly one default, stripe-size
/// syntax, spare reserve range.
pub fn validate(classes: &[DeviceClass]) -> Result<(), ValidationError> {
    ensure!(!classes.is_empty(), EmptySnafu);

    for dc in classes {
        ensure!(is_valid_device_class_name(&dc.name), InvalidNameSnafu { name: &dc.name });
    }

    let mut seen = BTreeSet::new();
    for dc in classes {
        ensure!(seen.insert(dc.name.as_str()), DuplicateNameSnafu { name: &dc.name });
    }

    let count = classes.iter().filter(|dc| dc.default).count();
    ensure!(count == 1, DefaultCountSnafu { count });

    for dc in classes.iter().filter(|dc| !dc.stripe_size.is_empty()) {
        StripeSize::parse(&dc.stripe_size).context(InvalidStripeSizeSnafu { name: &dc.name, stripe_size: &dc.stripe_size })?;
    }

    for dc in classes {
        if let Some(spare_gb) = dc.spare_gb {
            ensure!(spare_gb <= MAX_SPARE_GB, SpareOverflowSnafu { name: &dc.name, spare_gb });
        }
    }

    tracing::debug!(count = classes.len(), "device classes validated");
    Ok(())
}
