//! Intent responder for the FlexCore assistant ("FlexBot").
//!
//! This crate provides:
//!
//! - **Responder**: ordered, first-wins keyword matching of user text against
//!   a static rule table, with a randomized fallback, via
//!   [`responder::Responder`].
//! - **Rule table**: the authoritative FlexBot intents in [`rules`].
//! - **Contextual suggestions**: section-aware starter prompts in
//!   [`context`].

pub mod context;
pub mod error;
pub mod responder;
pub mod rules;

pub use context::contextual_suggestions;
pub use error::{IntentError, Result};
pub use responder::{FallbackSet, IntentRule, Reply, Responder, RuleTable};
