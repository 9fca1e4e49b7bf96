//! Speed-driven LED breathing animation

pub mod animator;

pub use animator::{BreathingAnimator, Direction, MAX_DUTY};
