//! LED output trait

/// A bank of dimmable LED channels
pub trait LedOutput {
    /// Error type for output failures
    type Error;

    /// Number of independently dimmable channels
    fn channel_count(&self) -> u8;

    /// Level corresponding to full brightness
    fn max_level(&self) -> u16;

    /// Set one channel's level (0 to `max_level`)
    fn set_channel_level(&mut self, channel: u8, level: u16) -> Result<(), Self::Error>;
}
