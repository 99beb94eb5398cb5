//! Plain-text transcript export.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use tracing::info;

use crate::chat::Message;
use crate::error::Result;

pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Converts bot HTML into a single line of plain text.
///
/// `<br>` becomes a space, every other tag is dropped, and runs of
/// whitespace collapse to one space.
#[derive(Debug, Clone)]
pub struct MarkupStripper {
    line_break: Regex,
    tag: Regex,
    whitespace: Regex,
}

impl MarkupStripper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            line_break: Regex::new(r"(?i)<br\s*/?>")?,
            tag: Regex::new(r"<[^>]*>")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    pub fn strip(&self, html: &str) -> String {
        let text = self.line_break.replace_all(html, " ");
        let text = self.tag.replace_all(&text, "");
        self.whitespace.replace_all(&text, " ").trim().to_owned()
    }
}

/// Convenience wrapper building a one-off [`MarkupStripper`].
pub fn strip_markup(html: &str) -> Result<String> {
    Ok(MarkupStripper::new()?.strip(html))
}

/// A downloadable transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptExport {
    /// `flexcore-chat-YYYY-MM-DD.txt`
    pub file_name: String,
    pub mime_type: &'static str,
    /// One `You: ...` / `FlexBot: ...` line per message, `\n`-separated.
    pub body: String,
}

impl TranscriptExport {
    pub fn build(messages: &[Message], date: NaiveDate, stripper: &MarkupStripper) -> Self {
        let body = messages
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), stripper.strip(&m.text)))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            file_name: format!("flexcore-chat-{}.txt", date.format("%Y-%m-%d")),
            mime_type: EXPORT_MIME_TYPE,
            body,
        }
    }

    /// Number of exported lines.
    pub fn line_count(&self) -> usize {
        if self.body.is_empty() {
            0
        } else {
            self.body.lines().count()
        }
    }

    /// Write the body to `dir/file_name` and return the full path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.body)?;
        info!(path = %path.display(), lines = self.line_count(), "transcript exported");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
