//! Breathing animator
//!
//! The duty cycle ramps between 0 and 100 at a rate that grows with ground
//! speed. Each time a breath peaks the animation moves to the next LED
//! channel. When stationary the light fades out and stays dark.

use crate::traits::LedOutput;

/// Full brightness
pub const MAX_DUTY: u8 = 100;

/// Largest duty change per tick
pub const MAX_STEP: u8 = 6;

const MPH_PER_KNOT: f32 = 1.15078;
const MPH_PER_STEP: f32 = 15.0;

/// Ramp direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Rising,
    Falling,
}

/// Breathing animation state
#[derive(Debug, Clone)]
pub struct BreathingAnimator {
    duty: u8,
    direction: Direction,
    active_channel: u8,
    channel_count: u8,
    /// Speeds at or below this count as stationary (knots)
    stationary_knots: f32,
}

impl BreathingAnimator {
    /// Start fully lit and falling on channel 0
    pub fn new(channel_count: u8) -> Self {
        Self {
            duty: MAX_DUTY,
            direction: Direction::Falling,
            active_channel: 0,
            channel_count: channel_count.max(1),
            stationary_knots: 0.0,
        }
    }

    pub fn with_stationary_threshold(mut self, knots: f32) -> Self {
        self.stationary_knots = knots.max(0.0);
        self
    }

    pub fn duty_cycle(&self) -> u8 {
        self.duty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_channel(&self) -> u8 {
        self.active_channel
    }

    /// Duty change per tick at `speed_knots`, or `None` when stationary
    pub fn step_for(&self, speed_knots: Option<f32>) -> Option<u8> {
        let knots = speed_knots.filter(|k| *k > self.stationary_knots)?;
        let steps = 1.0 + knots * MPH_PER_KNOT / MPH_PER_STEP;
        // Float to int casts saturate
        Some((steps as u8).clamp(1, MAX_STEP))
    }

    /// Advance one tick
    pub fn tick(&mut self, speed_knots: Option<f32>) {
        let Some(step) = self.step_for(speed_knots) else {
            self.direction = Direction::Falling;
            self.duty = self.duty.saturating_sub(1);
            return;
        };

        match self.direction {
            Direction::Rising => {
                self.duty = (self.duty + step).min(MAX_DUTY);
                if self.duty == MAX_DUTY {
                    self.direction = Direction::Falling;
                    self.active_channel = (self.active_channel + 1) % self.channel_count;
                }
            }
            Direction::Falling => {
                self.duty = self.duty.saturating_sub(step);
                if self.duty == 0 {
                    self.direction = Direction::Rising;
                }
            }
        }
    }

    /// Output level for a channel whose full scale is `max_level`
    pub fn level(&self, max_level: u16) -> u16 {
        (self.duty as u32 * max_level as u32 / MAX_DUTY as u32) as u16
    }

    /// Drive the active channel at the current level
    pub fn apply<L: LedOutput>(&self, leds: &mut L) -> Result<(), L::Error> {
        let level = self.level(leds.max_level());
        leds.set_channel_level(self.active_channel, level)
    }
}
