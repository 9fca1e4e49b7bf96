//! Board-agnostic core logic for the GPS display firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Fix record decoded from NMEA sentences, and its health monitor
//! - Page selection state machine with button debounce
//! - LED breathing animation driven by ground speed
//! - Hardware abstraction traits (LED output)
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod fix;
pub mod led;
pub mod page;
pub mod traits;
