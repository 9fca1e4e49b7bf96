//! Hardware abstraction traits
//!
//! These traits define the interface between core logic and
//! hardware-specific implementations.

pub mod led;

pub use led::LedOutput;
