//! UI layer for the FlexCore site.
//!
//! Everything here is written against abstract rendering targets so that it
//! runs identically under the terminal host, the line-mode CLI, and tests:
//!
//! - [`controller`]: the chat widget (visibility, transcript, turn guard,
//!   export).
//! - [`panel`]: the [`MessagePanel`] and [`InputField`] seams with in-memory
//!   implementations.
//! - [`chat`] / [`export`]: transcript model and plain-text export.
//! - [`keys`]: keyboard shortcut mapping.
//! - [`modal`]: product detail modal.
//! - [`nav`], [`carousel`], [`filter`], [`forms`], [`page`], [`reveal`]: page
//!   chrome.

pub mod carousel;
pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod filter;
pub mod forms;
pub mod keys;
pub mod modal;
pub mod nav;
pub mod page;
pub mod panel;
pub mod reveal;

pub use carousel::{Testimonial, TestimonialCarousel};
pub use chat::{Message, Role, Transcript};
pub use config::WidgetConfig;
pub use controller::{ConversationController, PendingReply, TurnState, UsageStats, Visibility};
pub use error::{Result, UiError};
pub use export::{MarkupStripper, TranscriptExport, strip_markup};
pub use filter::ProductFilter;
pub use forms::{ContactForm, FormInterceptor};
pub use keys::{Key, KeyPress, Shortcut};
pub use modal::ProductModal;
pub use nav::{NavBar, Section};
pub use page::{BackToTop, LoadingPhase, LoadingScreen, Overflow, PageState, run_optional};
pub use panel::{InputField, MemoryInput, MemoryPanel, MessagePanel, NodeId, PanelNode};
pub use reveal::{RevealElement, RevealStyle, RevealTracker};
