//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod buttons;
pub mod gps;
pub mod leds;
pub mod page;
pub mod render;

pub use buttons::button_task;
pub use gps::gps_task;
pub use leds::led_task;
pub use page::page_task;
pub use render::{render_task, Panel};
