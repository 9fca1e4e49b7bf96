//! Display page selection
//!
//! Pages cycle Speed -> Location -> Time (-> All) on debounced button edges.

pub mod events;
pub mod selector;

pub use events::{Button, ButtonEdge};
pub use selector::{DebounceMode, Page, PageSelector, DEBOUNCE_US};
