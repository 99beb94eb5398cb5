//! Product detail modal.
//!
//! Opening the modal locks page scrolling; closing it restores the page
//! exactly as it was.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use flexcore_kernel::AnalyticsSink;
use flexcore_store::{Catalog, Product};

use crate::page::PageState;

struct OpenModal {
    product_id: String,
    html: String,
    saved: PageState,
}

pub struct ProductModal {
    catalog: Arc<Catalog>,
    analytics: Arc<dyn AnalyticsSink>,
    open: Option<OpenModal>,
}

impl ProductModal {
    /// Modal rendering from `catalog` (normally the detail catalog).
    pub fn new(catalog: Arc<Catalog>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            catalog,
            analytics,
            open: None,
        }
    }

    /// Show product `id` and return the rendered HTML.
    ///
    /// Unknown ids leave the modal and page untouched.  Opening over an
    /// already open modal swaps the product but keeps the originally saved
    /// page state.
    pub fn open(&mut self, id: &str, page: &mut PageState) -> Option<&str> {
        let Some(product) = self.catalog.get(id) else {
            debug!(product = %id, "view_product ignored: unknown product");
            return None;
        };
        let html = render(product);

        let saved = match self.open.take() {
            Some(previous) => previous.saved,
            None => *page,
        };
        page.lock_scroll();

        self.analytics.track("Ecommerce", "view_product", id);
        let open = self.open.insert(OpenModal {
            product_id: id.to_owned(),
            html,
            saved,
        });
        Some(open.html.as_str())
    }

    /// Hide the modal and restore the saved page state.
    pub fn close(&mut self, page: &mut PageState) -> bool {
        match self.open.take() {
            Some(open) => {
                *page = open.saved;
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn product_id(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.product_id.as_str())
    }

    pub fn html(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.html.as_str())
    }
}

fn render(product: &Product) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"modal-product\"><img src=\"{}\" alt=\"{}\"><h2>{}</h2><p class=\"price\">{}</p>",
        product.image, product.name, product.name, product.price
    );
    if let Some(description) = &product.description {
        let _ = write!(html, "<p class=\"description\">{description}</p>");
    }
    if !product.features.is_empty() {
        html.push_str("<ul class=\"features\">");
        for feature in &product.features {
            let _ = write!(html, "<li>{feature}</li>");
        }
        html.push_str("</ul>");
    }
    let _ = write!(
        html,
        "<button class=\"add-to-cart\" data-product-id=\"{}\">Add to Cart</button></div>",
        product.id
    );
    html
}
