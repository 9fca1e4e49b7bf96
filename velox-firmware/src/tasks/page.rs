//! Page selection task

use defmt::*;

use velox_core::page::PageSelector;

use crate::channels::{BUTTON_EDGES, PAGE, REDRAW};

/// Page task - the only owner of the page selector
#[embassy_executor::task]
pub async fn page_task(mut selector: PageSelector) {
    info!("Page task started on {:?}", selector.page());

    *PAGE.lock().await = selector.page();
    REDRAW.signal(());

    loop {
        let edge = BUTTON_EDGES.receive().await;

        match selector.on_edge(edge.button, edge.timestamp_us) {
            Some(page) => {
                debug!("Page: {:?}", page);
                *PAGE.lock().await = page;
                REDRAW.signal(());
            }
            None => trace!("Bounce on {:?} ignored", edge.button),
        }
    }
}
