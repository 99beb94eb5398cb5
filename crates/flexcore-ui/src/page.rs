//! Page-level state shared by the chrome components.

use std::fmt::Display;
use std::time::Duration;

use tracing::{debug, warn};

/// Delay after page load before the loading screen starts fading.
pub const LOADING_HIDE_AFTER: Duration = Duration::from_millis(1000);
/// Fade duration before the loading screen is removed.
pub const LOADING_REMOVE_AFTER: Duration = Duration::from_millis(500);
/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

/// Whether the page body may scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Scroll position and body overflow of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageState {
    pub scroll_y: f64,
    pub overflow: Overflow,
}

impl PageState {
    pub fn lock_scroll(&mut self) {
        self.overflow = Overflow::Hidden;
    }

    pub fn unlock_scroll(&mut self) {
        self.overflow = Overflow::Auto;
    }

    pub fn is_locked(&self) -> bool {
        self.overflow == Overflow::Hidden
    }
}

// ---------------------------------------------------------------------------
// Loading screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    /// Fading out.
    Hidden,
    Removed,
}

/// Splash screen shown until shortly after page load.
#[derive(Debug, Clone, Copy)]
pub struct LoadingScreen {
    phase: LoadingPhase,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self {
            phase: LoadingPhase::Visible,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Phase the screen should be in `elapsed` after the load event.
    pub fn phase_at(elapsed: Duration) -> LoadingPhase {
        if elapsed < LOADING_HIDE_AFTER {
            LoadingPhase::Visible
        } else if elapsed < LOADING_HIDE_AFTER + LOADING_REMOVE_AFTER {
            LoadingPhase::Hidden
        } else {
            LoadingPhase::Removed
        }
    }

    /// Advance to the phase for `elapsed`.  Returns `true` on a change.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let next = Self::phase_at(elapsed);
        if next == self.phase {
            return false;
        }
        debug!(from = ?self.phase, to = ?next, "loading screen");
        self.phase = next;
        true
    }

    /// Run the full hide-then-remove sequence.
    pub async fn dismiss(&mut self) {
        tokio::time::sleep(LOADING_HIDE_AFTER).await;
        self.phase = LoadingPhase::Hidden;
        tokio::time::sleep(LOADING_REMOVE_AFTER).await;
        self.phase = LoadingPhase::Removed;
    }
}

// ---------------------------------------------------------------------------
// Back to top
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.visible = scroll_y > BACK_TO_TOP_THRESHOLD;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Scroll the page back to the top.
    pub fn activate(&mut self, page: &mut PageState) {
        page.scroll_y = 0.0;
        self.visible = false;
    }
}

/// Run an optional page feature, logging and swallowing its failure.
pub fn run_optional<T, E, F>(feature: &str, f: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(feature, error = %e, "optional feature unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_phases_follow_timeline() {
        assert_eq!(LoadingScreen::phase_at(Duration::ZERO), LoadingPhase::Visible);
        assert_eq!(
            LoadingScreen::phase_at(Duration::from_millis(999)),
            LoadingPhase::Visible
        );
        assert_eq!(
            LoadingScreen::phase_at(Duration::from_millis(1000)),
            LoadingPhase::Hidden
        );
        assert_eq!(
            LoadingScreen::phase_at(Duration::from_millis(1499)),
            LoadingPhase::Hidden
        );
        assert_eq!(
            LoadingScreen::phase_at(Duration::from_millis(1500)),
            LoadingPhase::Removed
        );
    }

    #[test]
    fn tick_reports_changes_only() {
        let mut screen = LoadingScreen::new();
        assert!(!screen.tick(Duration::from_millis(10)));
        assert!(screen.tick(Duration::from_millis(1200)));
        assert!(!screen.tick(Duration::from_millis(1300)));
        assert!(screen.tick(Duration::from_secs(2)));
        assert_eq!(screen.phase(), LoadingPhase::Removed);
    }

    #[test]
    fn back_to_top_threshold() {
        let mut btn = BackToTop::default();
        assert!(!btn.on_scroll(300.0));
        assert!(btn.on_scroll(301.0));

        let mut page = PageState {
            scroll_y: 900.0,
            ..PageState::default()
        };
        btn.activate(&mut page);
        assert_eq!(page.scroll_y, 0.0);
        assert!(!btn.is_visible());
    }

    #[test]
    fn optional_failures_are_swallowed() {
        let ok: Option<u8> = run_optional("viewer", || Ok::<_, String>(7));
        assert_eq!(ok, Some(7));
        let failed: Option<u8> = run_optional("viewer", || Err("no webgl"));
        assert_eq!(failed, None);
    }

    #[test]
    fn scroll_lock() {
        let mut page = PageState::default();
        page.lock_scroll();
        assert!(page.is_locked());
        page.unlock_scroll();
        assert!(!page.is_locked());
    }

    #[tokio::test]
    async fn dismiss_ends_removed() {
        let mut screen = LoadingScreen::new();
        screen.dismiss().await;
        assert_eq!(screen.phase(), LoadingPhase::Removed);
    }
}
