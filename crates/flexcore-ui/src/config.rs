//! Widget configuration.
//!
//! [`WidgetConfig`] holds the timing knobs of the chat widget and the page
//! notices.  Defaults match the live site; the CLI deserializes the
//! `[widget]` table of `flexcore.toml` into it, and callers can also use the
//! builder methods.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use flexcore_kernel::UniformDelay;

use crate::error::{Result, UiError};

/// Timing configuration for the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Lower bound of the simulated typing delay, in milliseconds.
    ///
    /// Default: **1 000 ms**.
    pub typing_delay_min_ms: u64,

    /// Upper bound of the simulated typing delay, in milliseconds.
    ///
    /// Default: **2 000 ms**.
    pub typing_delay_max_ms: u64,

    /// Seconds after page load before the preview bubble appears.
    ///
    /// Default: **10 s**.
    pub preview_after_secs: u64,

    /// Seconds the preview bubble stays visible.
    ///
    /// Default: **5 s**.
    pub preview_visible_secs: u64,

    /// Seconds a toast notice stays on screen.
    ///
    /// Default: **3 s**.
    pub notice_ttl_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            typing_delay_min_ms: 1000,
            typing_delay_max_ms: 2000,
            preview_after_secs: 10,
            preview_visible_secs: 5,
            notice_ttl_secs: 3,
        }
    }
}

impl WidgetConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the typing delay bounds (in milliseconds).
    pub fn with_typing_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.typing_delay_min_ms = min_ms;
        self.typing_delay_max_ms = max_ms;
        self
    }

    /// Set when the preview bubble appears and how long it stays.
    pub fn with_preview(mut self, after_secs: u64, visible_secs: u64) -> Self {
        self.preview_after_secs = after_secs;
        self.preview_visible_secs = visible_secs;
        self
    }

    /// Set the notice time-to-live (in seconds).
    pub fn with_notice_ttl(mut self, secs: u64) -> Self {
        self.notice_ttl_secs = secs;
        self
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        if self.typing_delay_min_ms > self.typing_delay_max_ms {
            return Err(UiError::InvalidConfig(format!(
                "typing_delay_min_ms ({}) exceeds typing_delay_max_ms ({})",
                self.typing_delay_min_ms, self.typing_delay_max_ms
            )));
        }
        if self.notice_ttl_secs == 0 {
            return Err(UiError::InvalidConfig(
                "notice_ttl_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Delay source drawing uniformly from the configured bounds.
    pub fn typing_delay(&self) -> UniformDelay {
        UniformDelay::new(
            Duration::from_millis(self.typing_delay_min_ms),
            Duration::from_millis(self.typing_delay_max_ms),
        )
    }

    pub fn preview_after(&self) -> Duration {
        Duration::from_secs(self.preview_after_secs)
    }

    pub fn preview_visible_for(&self) -> Duration {
        Duration::from_secs(self.preview_visible_secs)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    /// Whether the preview bubble is inside its display window `elapsed`
    /// after page load: from `preview_after` up to, but excluding,
    /// `preview_after + preview_visible_for`.
    pub fn preview_visible_at(&self, elapsed: Duration) -> bool {
        let start = self.preview_after();
        elapsed >= start && elapsed < start.saturating_add(self.preview_visible_for())
    }
}
