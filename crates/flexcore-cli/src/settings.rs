//! Application settings loaded from `config/flexcore.toml`.
//!
//! Every section and key is optional; anything missing falls back to the
//! built-in defaults, and a missing file means "all defaults".

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use flexcore_kernel::{AnalyticsSink, EventBus, NoopAnalytics, TracingAnalytics};
use flexcore_ui::WidgetConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub widget: WidgetConfig,
    pub analytics: AnalyticsSettings,
    pub logging: LoggingSettings,
}

/// Where analytics events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    None,
    #[default]
    Tracing,
    Bus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub sink: SinkKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Read and validate `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.widget.validate()?;
        Ok(settings)
    }

    /// Build the configured analytics sink.
    ///
    /// The bus variant gets a background subscriber that logs every event at
    /// debug level, so it needs a running tokio runtime.
    pub fn analytics_sink(&self) -> Arc<dyn AnalyticsSink> {
        match self.analytics.sink {
            SinkKind::None => Arc::new(NoopAnalytics),
            SinkKind::Tracing => Arc::new(TracingAnalytics),
            SinkKind::Bus => {
                let bus = EventBus::new(256);
                let mut rx = bus.subscribe();
                tokio::spawn(async move {
                    while let Ok(event) = rx.recv().await {
                        debug!(
                            id = %event.id,
                            category = %event.category,
                            action = %event.action,
                            label = %event.label,
                            "analytics event"
                        );
                    }
                });
                info!("analytics event bus ready");
                Arc::new(bus)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let s = Settings::parse("").unwrap();
        assert_eq!(s.widget, WidgetConfig::default());
        assert_eq!(s.analytics.sink, SinkKind::Tracing);
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let s = Settings::parse(
            r#"
            [widget]
            typing_delay_min_ms = 10
            typing_delay_max_ms = 20

            [analytics]
            sink = "none"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(s.widget.typing_delay_max_ms, 20);
        assert_eq!(s.widget.preview_after_secs, 10);
        assert_eq!(s.analytics.sink, SinkKind::None);
        assert_eq!(s.logging.level, "debug");
    }

    #[test]
    fn invalid_widget_is_rejected() {
        let err = Settings::parse("[widget]\ntyping_delay_min_ms = 5000\n").unwrap_err();
        assert!(err.to_string().contains("typing_delay_min_ms"));
    }

    #[test]
    fn unknown_sink_is_rejected() {
        assert!(Settings::parse("[analytics]\nsink = \"kafka\"\n").is_err());
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flexcore.toml");
        std::fs::write(&path, "[widget]\nnotice_ttl_secs = 7\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap().widget.notice_ttl_secs, 7);
    }

    #[tokio::test]
    async fn bus_sink_accepts_events() {
        let s = Settings {
            analytics: AnalyticsSettings { sink: SinkKind::Bus },
            ..Settings::default()
        };
        s.analytics_sink().track("Chatbot", "open", "toggle_button");
    }
}
