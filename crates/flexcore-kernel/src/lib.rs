//! FlexCore kernel.
//!
//! Small, dependency-light services shared by every other FlexCore crate:
//!
//! - **[`router`]** -- Ordered keyword router.  Every keyword of every rule is
//!   compiled into one [`aho_corasick`] automaton; the earliest-declared rule
//!   with any keyword contained in the input wins.
//! - **[`analytics`]** -- The fire-and-forget [`AnalyticsSink`] seam plus a
//!   broadcast-backed [`EventBus`] implementation.
//! - **[`random`]** -- Injectable [`RandomSource`] and [`DelaySource`]
//!   strategies so callers can force determinism in tests.
//! - **[`error`]** -- Unified kernel error types via [`thiserror`].

pub mod analytics;
pub mod error;
pub mod random;
pub mod router;

// Re-export the most commonly used types at the crate root for convenience.
pub use analytics::{
    AnalyticsEvent, AnalyticsSink, EventBus, NoopAnalytics, RecordingAnalytics, TracingAnalytics,
};
pub use error::{KernelError, Result};
pub use random::{
    DelaySource, FixedDelay, FixedRandom, RandomSource, SeededRandom, ThreadRandom, UniformDelay,
};
pub use router::{KeywordRouter, RouteResult};
