//! Status LED bank on one PWM slice
//!
//! Channel 0 is output A, channel 1 output B. Setting one channel leaves the
//! other at its last level.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use velox_core::traits::LedOutput;

/// Default PWM wrap value
pub const PWM_TOP: u16 = 1000;

/// LED bank errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    InvalidChannel,
}

/// Two LEDs on the A and B outputs of a PWM slice
pub struct PwmLeds {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmLeds {
    pub fn new(mut pwm: Pwm<'static>, top: u16) -> Self {
        let mut config = PwmConfig::default();
        config.top = top;
        config.compare_a = 0; // Start dark
        config.compare_b = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl LedOutput for PwmLeds {
    type Error = LedError;

    fn channel_count(&self) -> u8 {
        2
    }

    fn max_level(&self) -> u16 {
        self.config.top
    }

    fn set_channel_level(&mut self, channel: u8, level: u16) -> Result<(), LedError> {
        let level = level.min(self.config.top);
        let compare = match channel {
            0 => &mut self.config.compare_a,
            1 => &mut self.config.compare_b,
            _ => return Err(LedError::InvalidChannel),
        };

        if *compare != level {
            *compare = level;
            self.pwm.set_config(&self.config);
        }
        Ok(())
    }
}
