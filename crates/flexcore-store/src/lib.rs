//! # flexcore-store
//!
//! In-memory commerce state for the FlexCore site.
//!
//! Nothing here is persisted: the catalog is static and the cart lives for
//! one page session.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Cart (BTreeMap<id, CartLine>)          │
//! │    └─ notices ──► Notifier (NoticeLog)  │
//! │    └─ events  ──► AnalyticsSink         │
//! ├─────────────────────────────────────────┤
//! │  Catalog (cart + detail, drift report)  │
//! │  Money (integer cents)                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use flexcore_kernel::NoopAnalytics;
//! use flexcore_store::{Cart, Catalog};
//!
//! let mut cart = Cart::new(Arc::new(Catalog::cart_catalog()), Arc::new(NoopAnalytics));
//! cart.add("basic-bare");
//! cart.add("basic-bare");
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().to_string(), "$39.98");
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod notice;

// ── re-exports ───────────────────────────────────────────────────────

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogDrift, PriceMismatch, Product};
pub use error::{StoreError, StoreResult};
pub use money::Money;
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier};
