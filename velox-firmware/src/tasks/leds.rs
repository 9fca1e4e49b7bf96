//! Status LED task

use defmt::*;
use embassy_time::{Duration, Ticker};

use velox_core::config::LedConfig;
use velox_core::led::BreathingAnimator;
use velox_core::traits::LedOutput;

use crate::channels::FIX;
use crate::pwm::PwmLeds;

/// LED task - steps the breathing animation at the configured rate
#[embassy_executor::task]
pub async fn led_task(mut leds: PwmLeds, config: LedConfig) {
    info!("LED task started");

    let mut animator = BreathingAnimator::new(leds.channel_count())
        .with_stationary_threshold(config.stationary_knots);
    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));

    loop {
        ticker.next().await;

        let speed = FIX.lock().await.ground_speed_knots();
        animator.tick(speed);

        if let Err(e) = animator.apply(&mut leds) {
            warn!("LED update failed: {:?}", e);
        }
    }
}
