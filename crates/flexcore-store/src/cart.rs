//! Session cart.
//!
//! A map of product id to [`CartLine`].  Adding an id that is already present
//! bumps its quantity; a line never holds zero units.  Count and total are
//! folds over the current lines, recomputed on every call.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flexcore_kernel::AnalyticsSink;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::notice::{DEFAULT_NOTICE_TTL, Notice, NoticeLevel, Notifier};

/// One catalog product plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    /// Always at least 1.
    pub quantity: u32,
}

/// The shopping cart for one page session.
pub struct Cart {
    catalog: Arc<Catalog>,
    lines: BTreeMap<String, CartLine>,
    analytics: Arc<dyn AnalyticsSink>,
    notifier: Option<Arc<dyn Notifier>>,
    notice_ttl: Duration,
}

impl Cart {
    /// Create an empty cart pricing against `catalog`.
    pub fn new(catalog: Arc<Catalog>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            catalog,
            lines: BTreeMap::new(),
            analytics,
            notifier: None,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// Send an "added to cart" notice to `notifier` on every add.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// How long add-to-cart notices stay visible.
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Add one unit of `id`.
    ///
    /// Unknown ids leave the cart untouched and return `None`.
    pub fn add(&mut self, id: &str) -> Option<&CartLine> {
        let Some(product) = self.catalog.get(id) else {
            debug!(product = %id, "add_to_cart ignored: unknown product");
            return None;
        };

        let line = self
            .lines
            .entry(id.to_owned())
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                product_id: id.to_owned(),
                quantity: 1,
            });

        debug!(product = %id, quantity = line.quantity, "added to cart");

        if let Some(notifier) = &self.notifier {
            notifier.notify(Notice::new(
                format!("{} added to cart!", product.name),
                NoticeLevel::Success,
                self.notice_ttl,
            ));
        }
        self.analytics.track("Ecommerce", "add_to_cart", id);

        Some(&*line)
    }

    /// Remove one unit of `id`; the line disappears when it reaches zero.
    ///
    /// Returns the remaining quantity, or `None` if `id` was not in the cart.
    pub fn remove_one(&mut self, id: &str) -> Option<u32> {
        let line = self.lines.get_mut(id)?;
        line.quantity -= 1;
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(id);
        }
        self.analytics.track("Ecommerce", "remove_from_cart", id);
        Some(remaining)
    }

    /// Set the quantity of an existing line; `0` removes it.
    ///
    /// Returns `false` if `id` is not in the cart.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_line(id).is_some();
        }
        match self.lines.get_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drop the whole line for `id`.
    pub fn remove_line(&mut self, id: &str) -> Option<CartLine> {
        self.lines.remove(id)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The line for `id`, if present.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// All lines ordered by product id.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Sum of quantity times unit price.  Lines whose product has left the
    /// catalog contribute nothing.
    pub fn total(&self) -> Money {
        self.lines
            .values()
            .filter_map(|l| self.catalog.get(&l.product_id).map(|p| p.price * l.quantity))
            .sum()
    }

    /// The catalog this cart prices against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

// ── tests ────────────────────────────────────────────────────────────
