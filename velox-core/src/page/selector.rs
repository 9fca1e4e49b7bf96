//! Page selection state machine

use super::events::Button;
use crate::config::{ButtonConfig, DisplayConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default debounce window between accepted edges
pub const DEBOUNCE_US: u64 = 150_000;

/// Display pages, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Page {
    #[default]
    Speed,
    Location,
    Time,
    /// Composite of the three views, without graphics
    All,
}

impl Page {
    const CYCLE: [Page; 4] = [Page::Speed, Page::Location, Page::Time, Page::All];

    /// Look up a page by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "speed" => Some(Page::Speed),
            "location" => Some(Page::Location),
            "time" => Some(Page::Time),
            "all" => Some(Page::All),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Page::Speed => "speed",
            Page::Location => "location",
            Page::Time => "time",
            Page::All => "all",
        }
    }

    const fn index(self) -> usize {
        match self {
            Page::Speed => 0,
            Page::Location => 1,
            Page::Time => 2,
            Page::All => 3,
        }
    }

    /// Page reached from `self` by pressing `button`
    pub fn step(self, button: Button, include_all: bool) -> Self {
        let len = if include_all { 4 } else { 3 };
        let index = match button {
            Button::Next => (self.index() + 1) % len,
            Button::Previous => (self.index() + len - 1) % len,
        };
        Self::CYCLE[index]
    }
}

/// Debounce bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceMode {
    /// One window shared by every button
    #[default]
    Shared,
    /// Each button has its own window
    PerButton,
}

/// Current page plus button debounce state
#[derive(Debug, Clone)]
pub struct PageSelector {
    page: Page,
    include_all: bool,
    debounce_us: u64,
    mode: DebounceMode,
    last_accepted_us: [Option<u64>; 2],
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSelector {
    /// Start on the speed page with the default debounce window
    pub const fn new() -> Self {
        Self {
            page: Page::Speed,
            include_all: false,
            debounce_us: DEBOUNCE_US,
            mode: DebounceMode::Shared,
            last_accepted_us: [None; 2],
        }
    }

    /// Build a selector from the display and button configuration
    pub fn from_config(display: &DisplayConfig, buttons: &ButtonConfig) -> Self {
        let mode = if buttons.per_button_debounce {
            DebounceMode::PerButton
        } else {
            DebounceMode::Shared
        };
        Self {
            page: display.default_page,
            include_all: display.include_all_page || display.default_page == Page::All,
            debounce_us: buttons.debounce_ms as u64 * 1000,
            mode,
            last_accepted_us: [None; 2],
        }
    }

    /// Add the composite page to the cycle
    pub fn with_all_page(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn with_debounce_mode(mut self, mode: DebounceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Number of pages in the cycle
    pub fn cycle_len(&self) -> usize {
        if self.include_all {
            4
        } else {
            3
        }
    }

    /// Handle a button edge at `timestamp_us`
    ///
    /// Returns the new page when the edge is accepted. Edges closer than the
    /// debounce window to the last accepted edge are ignored and do not
    /// extend the window.
    pub fn on_edge(&mut self, button: Button, timestamp_us: u64) -> Option<Page> {
        let slot = match self.mode {
            DebounceMode::Shared => 0,
            DebounceMode::PerButton => button.index(),
        };

        if let Some(last) = self.last_accepted_us[slot] {
            if timestamp_us.saturating_sub(last) < self.debounce_us {
                return None;
            }
        }

        self.last_accepted_us[slot] = Some(timestamp_us);
        self.page = self.page.step(button, self.include_all);
        Some(self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: u64 = DEBOUNCE_US + 1;

    #[test]
    fn test_next_cycles_three_pages() {
        let mut sel = PageSelector::new();
        assert_eq!(sel.page(), Page::Speed);

        assert_eq!(sel.on_edge(Button::Next, 0), Some(Page::Location));
        assert_eq!(sel.on_edge(Button::Next, GAP), Some(Page::Time));
        assert_eq!(sel.on_edge(Button::Next, 2 * GAP), Some(Page::Speed));
    }

    #[test]
    fn test_previous_cycles_backwards() {
        let mut sel = PageSelector::new();
        assert_eq!(sel.on_edge(Button::Previous, 0), Some(Page::Time));
        assert_eq!(sel.on_edge(Button::Previous, GAP), Some(Page::Location));
        assert_eq!(sel.on_edge(Button::Previous, 2 * GAP), Some(Page::Speed));
    }

    #[test]
    fn test_bounce_counts_once() {
        let mut sel = PageSelector::new();
        assert_eq!(sel.on_edge(Button::Next, 1_000), Some(Page::Location));
        assert_eq!(sel.on_edge(Button::Next, 1_000 + 20_000), None);
        assert_eq!(sel.page(), Page::Location);
    }

    #[test]
    fn test_rejected_edge_does_not_extend_window() {
        let mut sel = PageSelector::new();
        sel.on_edge(Button::Next, 0);
        assert_eq!(sel.on_edge(Button::Next, 100_000), None);
        assert_eq!(sel.on_edge(Button::Next, DEBOUNCE_US), Some(Page::Time));
    }

    #[test]
    fn test_shared_window_blocks_other_button() {
        let mut sel = PageSelector::new();
        sel.on_edge(Button::Next, 0);
        assert_eq!(sel.on_edge(Button::Previous, 50_000), None);
    }

    #[test]
    fn test_per_button_window() {
        let mut sel = PageSelector::new().with_debounce_mode(DebounceMode::PerButton);
        assert_eq!(sel.on_edge(Button::Next, 0), Some(Page::Location));
        assert_eq!(sel.on_edge(Button::Previous, 50_000), Some(Page::Speed));
        assert_eq!(sel.on_edge(Button::Next, 60_000), None);
    }

    #[test]
    fn test_all_page_in_cycle() {
        let mut sel = PageSelector::new().with_all_page(true);
        assert_eq!(sel.cycle_len(), 4);
        assert_eq!(sel.on_edge(Button::Previous, 0), Some(Page::All));
        assert_eq!(sel.on_edge(Button::Next, GAP), Some(Page::Speed));
    }

    #[test]
    fn test_from_config() {
        let display = DisplayConfig {
            default_page: Page::All,
            ..Default::default()
        };
        let buttons = ButtonConfig {
            debounce_ms: 10,
            per_button_debounce: false,
        };
        let mut sel = PageSelector::from_config(&display, &buttons);
        assert_eq!(sel.page(), Page::All);
        assert_eq!(sel.cycle_len(), 4);
        assert_eq!(sel.on_edge(Button::Next, 0), Some(Page::Speed));
        assert_eq!(sel.on_edge(Button::Next, 10_000), Some(Page::Location));
    }

    #[test]
    fn test_page_names() {
        for page in Page::CYCLE {
            assert_eq!(Page::from_name(page.as_str()), Some(page));
        }
        assert_eq!(Page::from_name("map"), None);
    }
}
