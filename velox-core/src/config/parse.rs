//! Minimal TOML parser for the device configuration
//!
//! Handles only the subset the device file uses, not the full TOML language.
//!
//! Supported features:
//! - [section] and [section.subsection] headers
//! - Key = value pairs (string, integer, float, boolean)
//! - Comments (# ...), including after a value
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line or escaped strings
//! - Dotted keys outside section headers

use super::types::{DeviceConfig, SpeedUnit};
use crate::page::Page;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is neither a header, a key/value pair nor a comment
    Syntax { line: u16 },
    /// Section header names no known section
    UnknownSection { line: u16 },
    /// Key is not valid in its section
    UnknownKey { line: u16 },
    /// Value has the wrong type or an unknown name
    InvalidValue { line: u16 },
    /// Value outside its allowed range
    OutOfRange { key: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Gps,
    GpsOutput,
    Display,
    Buttons,
    Leds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Bool(bool),
    Int(i64),
    Float(f32),
    Str(&'a str),
}

impl Value<'_> {
    fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn as_u32(self) -> Option<u32> {
        match self {
            Value::Int(i) => u32::try_from(i).ok(),
            _ => None,
        }
    }

    fn as_f32(self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f32),
            _ => None,
        }
    }
}

/// Parse TOML configuration into a validated DeviceConfig
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = strip_comment(header)
                .strip_suffix(']')
                .ok_or(ConfigError::Syntax { line: line_no })?;
            section = parse_section_header(header)
                .ok_or(ConfigError::UnknownSection { line: line_no })?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Syntax { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "gps" => Some(Section::Gps),
        "gps.output" => Some(Section::GpsOutput),
        "display" => Some(Section::Display),
        "buttons" => Some(Section::Buttons),
        "leds" => Some(Section::Leds),
        _ => None,
    }
}

/// Split `key = value # comment`
fn parse_key_value(line: &str) -> Option<(&str, Value<'_>)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    Some((key, parse_value(rest.trim())?))
}

fn parse_value(raw: &str) -> Option<Value<'_>> {
    if let Some(quoted) = raw.strip_prefix('"') {
        let (text, rest) = quoted.split_once('"')?;
        let rest = rest.trim();
        if !rest.is_empty() && !rest.starts_with('#') {
            return None;
        }
        return Some(Value::Str(text));
    }

    let raw = strip_comment(raw);
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    let digits_only = raw.bytes().all(|b| b.is_ascii_digit() || b == b'_' || b == b'-' || b == b'+');
    if digits_only {
        return parse_int(raw).map(Value::Int);
    }

    let numeric = raw
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E' | b'_'));
    if numeric && raw.bytes().any(|b| b.is_ascii_digit()) {
        return parse_float(raw).map(Value::Float);
    }

    None
}

/// Integer with optional `_` separators
fn parse_int(raw: &str) -> Option<i64> {
    let mut buf = [0u8; 24];
    let text = strip_underscores(raw, &mut buf)?;
    text.parse().ok()
}

fn parse_float(raw: &str) -> Option<f32> {
    let mut buf = [0u8; 24];
    let text = strip_underscores(raw, &mut buf)?;
    text.parse::<f32>().ok().filter(|f| f.is_finite())
}

fn strip_underscores<'b>(raw: &str, buf: &'b mut [u8; 24]) -> Option<&'b str> {
    let mut len = 0;
    for b in raw.bytes().filter(|&b| b != b'_') {
        *buf.get_mut(len)? = b;
        len += 1;
    }
    core::str::from_utf8(&buf[..len]).ok()
}

fn strip_comment(raw: &str) -> &str {
    match raw.split_once('#') {
        Some((value, _)) => value.trim(),
        None => raw.trim(),
    }
}

fn apply_value(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
    line: u16,
) -> Result<(), ConfigError> {
    let invalid = ConfigError::InvalidValue { line };

    match (section, key) {
        (Section::Gps, "baud_rate") => config.gps.baud_rate = value.as_u32().ok_or(invalid)?,
        (Section::Gps, "cold_restart") => config.gps.cold_restart = value.as_bool().ok_or(invalid)?,
        (Section::Gps, "require_checksum") => {
            config.gps.require_checksum = value.as_bool().ok_or(invalid)?
        }
        (Section::Gps, "stale_after_ms") => {
            config.gps.stale_after_ms = value.as_u32().ok_or(invalid)?
        }

        (Section::GpsOutput, _) => {
            let enabled = value.as_bool().ok_or(invalid)?;
            let output = &mut config.gps.output;
            match key {
                "gll" => output.gll = enabled,
                "rmc" => output.rmc = enabled,
                "vtg" => output.vtg = enabled,
                "gga" => output.gga = enabled,
                "gsa" => output.gsa = enabled,
                "gsv" => output.gsv = enabled,
                _ => return Err(ConfigError::UnknownKey { line }),
            }
        }

        (Section::Display, "refresh_ms") => {
            config.display.refresh_ms = value.as_u32().ok_or(invalid)?
        }
        (Section::Display, "default_page") => {
            config.display.default_page = text(value)
                .and_then(Page::from_name)
                .ok_or(invalid)?
        }
        (Section::Display, "include_all_page") => {
            config.display.include_all_page = value.as_bool().ok_or(invalid)?
        }
        (Section::Display, "speed_unit") => {
            config.display.speed_unit = text(value)
                .and_then(SpeedUnit::from_name)
                .ok_or(invalid)?
        }
        (Section::Display, "speed_max") => {
            config.display.speed_max = value
                .as_u32()
                .and_then(|v| u16::try_from(v).ok())
                .ok_or(invalid)?
        }

        (Section::Buttons, "debounce_ms") => {
            config.buttons.debounce_ms = value.as_u32().ok_or(invalid)?
        }
        (Section::Buttons, "per_button_debounce") => {
            config.buttons.per_button_debounce = value.as_bool().ok_or(invalid)?
        }

        (Section::Leds, "tick_ms") => config.leds.tick_ms = value.as_u32().ok_or(invalid)?,
        (Section::Leds, "stationary_knots") => {
            config.leds.stationary_knots = value.as_f32().ok_or(invalid)?
        }

        _ => return Err(ConfigError::UnknownKey { line }),
    }

    Ok(())
}

fn text(value: Value<'_>) -> Option<&str> {
    match value {
        Value::Str(s) => Some(s),
        _ => None,
    }
}
