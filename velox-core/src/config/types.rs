//! Configuration type definitions
//!
//! Every section has defaults, so an empty file is a valid configuration.

use velox_nmea::{ChecksumPolicy, OutputMask};

use super::parse::ConfigError;
use crate::page::Page;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit the speed page displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedUnit {
    #[default]
    Kmh,
    Mph,
    Knots,
}

impl SpeedUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kmh" => Some(SpeedUnit::Kmh),
            "mph" => Some(SpeedUnit::Mph),
            "knots" => Some(SpeedUnit::Knots),
            _ => None,
        }
    }

    /// Convert a speed in knots to this unit
    pub fn from_knots(self, knots: f32) -> f32 {
        match self {
            SpeedUnit::Kmh => knots * 1.852,
            SpeedUnit::Mph => knots * 1.15078,
            SpeedUnit::Knots => knots,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpeedUnit::Kmh => "km/h",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Knots => "kn",
        }
    }
}

/// NMEA sentences requested from the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct OutputConfig {
    pub gll: bool,
    pub rmc: bool,
    pub vtg: bool,
    pub gga: bool,
    pub gsa: bool,
    pub gsv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let mask = OutputMask::DECODED;
        Self {
            gll: mask.gll,
            rmc: mask.rmc,
            vtg: mask.vtg,
            gga: mask.gga,
            gsa: mask.gsa,
            gsv: mask.gsv,
        }
    }
}

impl OutputConfig {
    pub fn mask(&self) -> OutputMask {
        OutputMask {
            gll: self.gll,
            rmc: self.rmc,
            vtg: self.vtg,
            gga: self.gga,
            gsa: self.gsa,
            gsv: self.gsv,
        }
    }
}

/// GPS receiver link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GpsConfig {
    /// UART baud rate
    pub baud_rate: u32,
    /// Send a cold restart at boot
    pub cold_restart: bool,
    /// Reject sentences without a `*XX` checksum
    pub require_checksum: bool,
    /// Time without a decoded sentence before the fix is stale
    pub stale_after_ms: u32,
    pub output: OutputConfig,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            cold_restart: true,
            require_checksum: false,
            stale_after_ms: 5000,
            output: OutputConfig::default(),
        }
    }
}

impl GpsConfig {
    pub fn checksum_policy(&self) -> ChecksumPolicy {
        if self.require_checksum {
            ChecksumPolicy::Required
        } else {
            ChecksumPolicy::IfPresent
        }
    }
}

/// Display rendering
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// Periodic redraw interval
    pub refresh_ms: u32,
    /// Page shown at boot
    pub default_page: Page,
    /// Add the composite page to the cycle
    pub include_all_page: bool,
    pub speed_unit: SpeedUnit,
    /// Full scale of the speed bar, in `speed_unit`
    pub speed_max: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 500,
            default_page: Page::Speed,
            include_all_page: false,
            speed_unit: SpeedUnit::Kmh,
            speed_max: 150,
        }
    }
}

/// Page buttons
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ButtonConfig {
    pub debounce_ms: u32,
    /// One debounce window per button instead of a shared one
    pub per_button_debounce: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            per_button_debounce: false,
        }
    }
}

/// Status LEDs
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LedConfig {
    /// Animation tick interval
    pub tick_ms: u32,
    /// Speeds at or below this are treated as stopped (knots)
    pub stationary_knots: f32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            stationary_knots: 0.0,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DeviceConfig {
    pub gps: GpsConfig,
    pub display: DisplayConfig,
    pub buttons: ButtonConfig,
    pub leds: LedConfig,
}

impl DeviceConfig {
    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("gps.baud_rate", self.gps.baud_rate, 1200, 921_600)?;
        check("gps.stale_after_ms", self.gps.stale_after_ms, 100, 600_000)?;
        check("display.refresh_ms", self.display.refresh_ms, 20, 10_000)?;
        check("display.speed_max", self.display.speed_max as u32, 1, 1000)?;
        check("buttons.debounce_ms", self.buttons.debounce_ms, 0, 2000)?;
        check("leds.tick_ms", self.leds.tick_ms, 1, 1000)?;

        let knots = self.leds.stationary_knots;
        if !(0.0..=100.0).contains(&knots) {
            return Err(ConfigError::OutOfRange {
                key: "leds.stationary_knots",
            });
        }
        Ok(())
    }
}

fn check(key: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key })
    }
}
