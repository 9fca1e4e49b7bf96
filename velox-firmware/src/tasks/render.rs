//! Display render task

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Instant, Ticker};

use velox_core::config::DisplayConfig;
use velox_core::fix::FixMonitor;
use velox_core::page::Page;
use velox_display::layout::BACKGROUND;
use velox_display::{DrawSurface, GraphicsSurface, Renderer};

use crate::channels::{FIX, PAGE, REDRAW};
use crate::ili9341::Ili9341;

/// The panel as wired on the board
pub type Panel =
    Ili9341<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

/// Render task - redraws on every tick and on page changes
#[embassy_executor::task]
pub async fn render_task(panel: Panel, config: DisplayConfig, monitor: FixMonitor) {
    info!("Render task started");

    let mut surface = GraphicsSurface::new(panel);
    let renderer = Renderer::from_config(&config);
    let mut ticker = Ticker::every(Duration::from_millis(config.refresh_ms as u64));
    let mut shown: Option<Page> = None;

    loop {
        let page = *PAGE.lock().await;
        // Snapshot, then draw without holding the lock
        let fix = FIX.lock().await.clone();
        let health = monitor.check(&fix, Instant::now().as_millis());

        if shown != Some(page) {
            match surface.clear(BACKGROUND) {
                Ok(()) => shown = Some(page),
                Err(e) => warn!("Display clear failed: {:?}", e),
            }
        }

        match renderer.render(&mut surface, page, &fix, health) {
            Ok(()) => trace!("Rendered {:?} ({:?})", page, health),
            Err(e) => {
                warn!("Render failed: {:?}", e);
                shown = None;
            }
        }

        select(ticker.next(), REDRAW.wait()).await;
    }
}
