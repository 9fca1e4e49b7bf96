//! Shared state and inter-task channels
//!
//! The fix record and the current page are the only state shared between
//! tasks; everything else is owned by a single task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use velox_core::fix::FixRecord;
use velox_core::page::{ButtonEdge, Page};

/// Channel capacity for button edges
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Latest decoded GPS state
///
/// Written by the GPS task one whole sentence at a time; readers copy a
/// snapshot and release the lock before doing any slow work.
pub static FIX: Mutex<CriticalSectionRawMutex, FixRecord> = Mutex::new(FixRecord::new());

/// Page currently shown (published by the page task)
pub static PAGE: Mutex<CriticalSectionRawMutex, Page> = Mutex::new(Page::Speed);

/// Request an immediate redraw (page changed)
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Timestamped falling edges from the page buttons
pub static BUTTON_EDGES: Channel<CriticalSectionRawMutex, ButtonEdge, BUTTON_CHANNEL_SIZE> =
    Channel::new();
