#![no_std]
extern crate alloc;

use alloc::string::String;
use snafu::Snafu;

// Vocabulary: a "device class" is a named provisioning policy bound to one volume group.
// The daemon resolves every volume request to one of them through a DeviceClassManager.

pub mod config;
mod device_class;
mod manager;
pub mod quantity;
mod validate;

pub use config::Config;
pub use device_class::{DEFAULT_SPARE_GB, DeviceClass, DeviceClassRef, MAX_SPARE_GB};
pub use manager::{DeviceClassManager, LookupError};
pub use validate::{ValidationError, validate};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to read configuration"))]
    Io { source: acid_io::Error },
    #[snafu(display("malformed configuration: {}", error))]
    ParseError { error: String },
    #[snafu(display("unexpected configuration value: {}", error))]
    Deserialize { error: String },
    #[snafu(display("invalid device classes"))]
    Invalid { source: ValidationError },
}
