//! Button events that drive page selection

/// Page buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advance to the following page
    Next,
    /// Go back to the preceding page
    Previous,
}

impl Button {
    /// Stable index for per-button bookkeeping
    pub const fn index(self) -> usize {
        match self {
            Button::Next => 0,
            Button::Previous => 1,
        }
    }
}

/// A falling edge seen on a button pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    pub button: Button,
    /// Monotonic timestamp in microseconds
    pub timestamp_us: u64,
}
