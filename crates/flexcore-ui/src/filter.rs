//! Product grid filter.

use std::sync::Arc;

use flexcore_kernel::AnalyticsSink;
use flexcore_store::Catalog;

pub const ALL: &str = "all";

pub struct ProductFilter {
    analytics: Arc<dyn AnalyticsSink>,
    active: String,
}

impl ProductFilter {
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            analytics,
            active: ALL.to_owned(),
        }
    }

    /// Select `filter` and return the ids of the products it shows, in
    /// catalog order.
    pub fn apply<'a>(&mut self, filter: &str, catalog: &'a Catalog) -> Vec<&'a str> {
        self.active = filter.to_owned();
        self.analytics.track("Products", "filter", filter);
        visible(filter, catalog)
    }

    pub fn active(&self) -> &str {
        &self.active
    }
}

/// Ids shown under `filter` without recording anything.
pub fn visible<'a>(filter: &str, catalog: &'a Catalog) -> Vec<&'a str> {
    catalog
        .products()
        .iter()
        .filter(|p| filter == ALL || p.category == filter)
        .map(|p| p.id.as_str())
        .collect()
}
