//! Page button task

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use velox_core::page::{Button, ButtonEdge};

use crate::channels::BUTTON_EDGES;

/// Button task - one instance per button
///
/// Timestamps every falling edge and forwards it; debouncing happens in the
/// page task.
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started: {:?}", button);

    loop {
        pin.wait_for_falling_edge().await;

        let edge = ButtonEdge {
            button,
            timestamp_us: Instant::now().as_micros(),
        };
        if BUTTON_EDGES.try_send(edge).is_err() {
            warn!("Button channel full, dropping edge");
        }
    }
}
