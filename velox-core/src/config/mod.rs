//! Device configuration
//!
//! The configuration is a TOML file compiled into the firmware. It is
//! validated on the host at build time and parsed again on the device.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::{
    ButtonConfig, DeviceConfig, DisplayConfig, GpsConfig, LedConfig, OutputConfig, SpeedUnit,
};
