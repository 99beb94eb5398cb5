//! Navigation bar: scrolled styling, scroll-spy, mobile menu and in-page
//! navigation.

use std::sync::Arc;

use tracing::debug;

use flexcore_kernel::AnalyticsSink;

use crate::page::PageState;

/// Scroll offset past which the bar switches to its compact style.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
/// A section counts as current once its top is this close to the viewport top.
pub const SCROLL_SPY_OFFSET: f64 = 120.0;
/// Height of the fixed header subtracted from navigation targets.
pub const HEADER_OFFSET: f64 = 80.0;

/// A page section, positioned by its absolute top offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

pub struct NavBar {
    sections: Vec<Section>,
    analytics: Arc<dyn AnalyticsSink>,
    active: Option<String>,
    scrolled: bool,
    menu_open: bool,
}

impl NavBar {
    /// `sections` must be in document order.
    pub fn new(sections: Vec<Section>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            sections,
            analytics,
            active: None,
            scrolled: false,
            menu_open: false,
        }
    }

    /// Update the scrolled style and the active link for `scroll_y`.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrolled = scroll_y > SCROLLED_THRESHOLD;
        self.active = self
            .sections
            .iter()
            .filter(|s| s.top - scroll_y <= SCROLL_SPY_OFFSET)
            .last()
            .map(|s| s.id.clone());
    }

    /// Open or close the mobile menu, locking page scroll while open.
    pub fn toggle_menu(&mut self, page: &mut PageState) -> bool {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            page.lock_scroll();
        } else {
            page.unlock_scroll();
        }
        self.menu_open
    }

    pub fn close_menu(&mut self, page: &mut PageState) {
        self.menu_open = false;
        page.unlock_scroll();
    }

    /// Scroll to section `target` (`"#id"` or `"id"`).
    ///
    /// Returns the new scroll offset, or `None` for an unknown section.
    pub fn navigate(&mut self, target: &str, page: &mut PageState) -> Option<f64> {
        let id = target.trim_start_matches('#');
        let Some(section) = self.sections.iter().find(|s| s.id == id) else {
            debug!(target = %id, "navigation ignored: unknown section");
            return None;
        };

        // Viewport-relative top plus current scroll, minus the header.
        let viewport_top = section.top - page.scroll_y;
        let offset = (viewport_top + page.scroll_y - HEADER_OFFSET).max(0.0);

        self.active = Some(section.id.clone());
        self.close_menu(page);
        page.scroll_y = offset;
        self.analytics.track("Navigation", "click", id);
        Some(offset)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}
