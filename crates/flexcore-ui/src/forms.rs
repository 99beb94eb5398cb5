//! Newsletter and contact form handling.
//!
//! Submissions never leave the page; they are validated and turned into a
//! [`Notice`] for the visitor.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use flexcore_kernel::AnalyticsSink;
use flexcore_store::{Notice, NoticeLevel};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub struct FormInterceptor {
    email: Regex,
    analytics: Arc<dyn AnalyticsSink>,
    notice_ttl: Duration,
}

impl FormInterceptor {
    pub fn new(analytics: Arc<dyn AnalyticsSink>, notice_ttl: Duration) -> Result<Self> {
        Ok(Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            analytics,
            notice_ttl,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email.trim())
    }

    pub fn submit_newsletter(&self, email: &str) -> Notice {
        if !self.is_valid_email(email) {
            debug!("newsletter rejected: invalid email");
            return self.notice("Please enter a valid email address.", NoticeLevel::Error);
        }
        self.analytics.track("Form", "submit", "newsletter");
        self.notice("Thanks for subscribing! Check your inbox soon.", NoticeLevel::Success)
    }

    pub fn submit_contact(&self, form: &ContactForm) -> Notice {
        if form.name.trim().is_empty() || form.message.trim().is_empty() {
            debug!("contact rejected: missing fields");
            return self.notice("Please fill in all fields.", NoticeLevel::Error);
        }
        if !self.is_valid_email(&form.email) {
            debug!("contact rejected: invalid email");
            return self.notice("Please enter a valid email address.", NoticeLevel::Error);
        }
        self.analytics.track("Form", "submit", "contact");
        self.notice(
            "Message sent! We'll get back to you within 24 hours.",
            NoticeLevel::Success,
        )
    }

    fn notice(&self, text: &str, level: NoticeLevel) -> Notice {
        Notice::new(text, level, self.notice_ttl)
    }
}
