use alloc::string::String;
use alloc::vec::Vec;

use crate::quantity::StripeSize;

/// Spare capacity kept free in a volume group when a device class does not
/// set its own `spare_gb`.
pub const DEFAULT_SPARE_GB: u64 = 10;

/// Largest reserve, in GB, that still converts to bytes inside a `u64`.
pub const MAX_SPARE_GB: u64 = u64::MAX >> 30;

pub(crate) fn gb_to_bytes(gb: u64) -> u64 {
    gb.saturating_mul(1 << 30)
}

/// One configured storage policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceClass {
    pub name: String,
    pub volume_group: String,
    pub default: bool,
    pub spare_gb: Option<u64>,
    pub stripe: Option<u32>,
    pub stripe_size: String,
    pub lvcreate_options: Vec<String>,
}

impl DeviceClass {
    pub fn new(name: impl Into<String>, volume_group: impl Into<String>) -> Self {
        Self { name: name.into(), volume_group: volume_group.into(), ..Self::default() }
    }

    /// Reserved capacity in bytes, falling back to `default_spare_gb` when
    /// the class has no reserve of its own.
    pub fn spare(&self, default_spare_gb: u64) -> u64 {
        match self.spare_gb {
            Some(gb) => gb_to_bytes(gb),
            None => gb_to_bytes(default_spare_gb),
        }
    }
}

/// A device class as seen through a [`DeviceClassManager`](crate::DeviceClassManager).
#[derive(Clone, Copy, Debug)]
pub struct DeviceClassRef<'a> {
    pub(crate) class: &'a DeviceClass,
    pub(crate) default_spare_gb: u64,
}

impl<'a> DeviceClassRef<'a> {
    pub fn name(&self) -> &'a str {
        &self.class.name
    }
    pub fn volume_group(&self) -> &'a str {
        &self.class.volume_group
    }
    pub fn is_default(&self) -> bool {
        self.class.default
    }
    pub fn spare_gb(&self) -> Option<u64> {
        self.class.spare_gb
    }
    /// Bytes that must stay unallocated in the volume group.
    pub fn spare(&self) -> u64 {
        self.class.spare(self.default_spare_gb)
    }
    pub fn stripe(&self) -> Option<u32> {
        self.class.stripe
    }
    /// `None` when the volume manager should pick the stripe size.
    pub fn stripe_size(&self) -> Option<StripeSize> {
        if self.class.stripe_size.is_empty() {
            return None;
        }
        StripeSize::parse(&self.class.stripe_size).ok()
    }
    pub fn lvcreate_options(&self) -> &'a [String] {
        &self.class.lvcreate_options
    }

    pub fn raw(&self) -> &'a DeviceClass {
        self.class
    }
}
