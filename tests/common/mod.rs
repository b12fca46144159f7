#![allow(dead_code)]

use lvmd_device_class::DeviceClass;
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_max_level(Level::TRACE).with_test_writer().try_init();
}

pub fn dc(name: &str, volume_group: &str) -> DeviceClass {
    DeviceClass::new(name, volume_group)
}

pub fn default_dc(name: &str, volume_group: &str) -> DeviceClass {
    DeviceClass { default: true, ..DeviceClass::new(name, volume_group) }
}

pub fn striped(name: &str, volume_group: &str, stripe_size: &str) -> DeviceClass {
    DeviceClass { stripe: Some(2), stripe_size: stripe_size.into(), ..DeviceClass::new(name, volume_group) }
}
