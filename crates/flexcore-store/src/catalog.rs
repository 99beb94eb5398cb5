//! Static product catalogs.
//!
//! Two catalogs exist: the lean one the cart prices against and the richer
//! one the product modal renders from.  They are maintained separately and
//! can disagree; [`Catalog::drift`] reports how.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::money::Money;

// ── product ──────────────────────────────────────────────────────────

/// One purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, e.g. `"basic-bare"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image reference (relative URL).
    pub image: String,
    /// Filter category, e.g. `"base"`, `"cores"`, `"bundles"`.
    pub category: String,
    /// Long-form description (detail catalog only).
    #[serde(default)]
    pub description: Option<String>,
    /// Feature bullet points (detail catalog only).
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    fn new(id: &str, name: &str, cents: u64, category: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            price: Money::from_cents(cents),
            image: format!("images/{id}.jpg"),
            category: category.to_owned(),
            description: None,
            features: Vec::new(),
        }
    }

    fn describe(mut self, description: &str, features: &[&str]) -> Self {
        self.description = Some(description.to_owned());
        self.features = features.iter().map(|f| (*f).to_owned()).collect();
        self
    }
}

// ── drift ────────────────────────────────────────────────────────────

/// A product priced differently by two catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceMismatch {
    pub id: String,
    pub ours: Money,
    pub theirs: Money,
}

/// Differences between two catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDrift {
    /// Ids present only in the catalog `drift` was called on.
    pub only_in_self: Vec<String>,
    /// Ids present only in the other catalog.
    pub only_in_other: Vec<String>,
    /// Ids present in both with different prices.
    pub price_mismatches: Vec<PriceMismatch>,
}

impl CatalogDrift {
    /// Whether both catalogs agree on ids and prices.
    pub fn is_consistent(&self) -> bool {
        self.only_in_self.is_empty()
            && self.only_in_other.is_empty()
            && self.price_mismatches.is_empty()
    }

    /// Emit one warning per discrepancy.
    pub fn log(&self) {
        for id in &self.only_in_self {
            warn!(product = %id, "product missing from detail catalog");
        }
        for id in &self.only_in_other {
            warn!(product = %id, "product missing from cart catalog");
        }
        for m in &self.price_mismatches {
            warn!(product = %m.id, ours = %m.ours, theirs = %m.theirs, "catalog price mismatch");
        }
    }
}

// ── catalog ──────────────────────────────────────────────────────────

/// Ordered, read-only product list with lookup by id.
///
/// Deserializes from a JSON array and runs the same checks as
/// [`Catalog::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = StoreError;

    fn try_from(products: Vec<Product>) -> StoreResult<Self> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}

impl Catalog {
    /// Build a catalog, rejecting blank and duplicate ids.
    pub fn new(products: Vec<Product>) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if product.id.trim().is_empty() {
                return Err(StoreError::InvalidProduct {
                    id: product.id.clone(),
                    reason: "blank id".into(),
                });
            }
            if !seen.insert(product.id.as_str()) {
                return Err(StoreError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The catalog the cart prices against.
    pub fn cart_catalog() -> Self {
        Self {
            products: vec![
                Product::new("basic-bare", "Basic Bare", 1999, "base"),
                Product::new("running-core", "Running Core", 1999, "cores"),
                Product::new("casual-core", "Casual Core", 1999, "cores"),
                Product::new("cleat-core", "Cleat Core", 1999, "cores"),
                Product::new("gym-core", "Gym Core", 1999, "cores"),
                Product::new("court-core", "Court Core", 1999, "cores"),
                Product::new("starter-kit", "Starter Kit", 9499, "bundles"),
            ],
        }
    }

    /// The richer catalog the product modal renders from.
    pub fn detail_catalog() -> Self {
        Self {
            products: vec![
                Product::new("basic-bare", "Basic Bare", 1999, "base").describe(
                    "The foundation of every FlexCore setup: a lightweight, breathable base shoe with the QuickLock™ mount.",
                    &[
                        "Memory foam insole",
                        "QuickLock™ core mount",
                        "US 5-15, regular to extra wide",
                    ],
                ),
                Product::new("running-core", "Running Core", 1999, "cores").describe(
                    "Lightweight core with responsive cushioning for road and trail.",
                    &["Responsive cushioning", "Breathable mesh", "10,000+ step tested"],
                ),
                Product::new("casual-core", "Casual Core", 1999, "cores").describe(
                    "Everyday comfort with a clean, minimalist look.",
                    &["Soft-touch finish", "All-day comfort", "12+ colorways"],
                ),
                Product::new("cleat-core", "Cleat Core", 1999, "cores").describe(
                    "Professional-grade traction for field sports.",
                    &["Molded studs", "Lateral stability", "Weather resistant"],
                ),
                Product::new("gym-core", "Gym Core", 1999, "cores").describe(
                    "A flat, stable base for lifting and training.",
                    &["Flat sole", "Grippy rubber", "Low profile"],
                ),
                Product::new("glow-core", "Glow Core", 1999, "cores").describe(
                    "Glow-in-the-dark youth core for growing feet.",
                    &["Youth sizes US 1-7", "Glow-in-the-dark", "LED accents"],
                ),
                Product::new("starter-kit", "Starter Kit", 9499, "bundles").describe(
                    "Basic Bare plus two cores of your choice. Saves $14.98 versus buying separately.",
                    &["Basic Bare included", "Any 2 cores", "Free shipping"],
                ),
            ],
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether `id` is in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.products {
            if !out.contains(&p.category.as_str()) {
                out.push(&p.category);
            }
        }
        out
    }

    /// Compare ids and prices against `other`.
    pub fn drift(&self, other: &Catalog) -> CatalogDrift {
        let mut drift = CatalogDrift::default();

        for ours in &self.products {
            match other.get(&ours.id) {
                None => drift.only_in_self.push(ours.id.clone()),
                Some(theirs) if theirs.price != ours.price => {
                    drift.price_mismatches.push(PriceMismatch {
                        id: ours.id.clone(),
                        ours: ours.price,
                        theirs: theirs.price,
                    });
                }
                Some(_) => {}
            }
        }
        drift.only_in_other = other
            .products
            .iter()
            .filter(|p| !self.contains(&p.id))
            .map(|p| p.id.clone())
            .collect();

        drift
    }
}

// ── tests ────────────────────────────────────────────────────────────
