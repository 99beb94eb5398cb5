//! Section-aware starter suggestions.
//!
//! When the widget opens, the host offers prompts that fit the page section
//! the visitor is currently reading.

/// Starter suggestions for the page section with id `section`.
pub fn contextual_suggestions(section: &str) -> &'static [&'static str] {
    match section {
        "products" => &[
            "Which core is best for me?",
            "Starter kit details",
            "Size guide",
        ],
        "features" => &[
            "How does QuickLock work?",
            "Durability info",
            "Comfort features",
        ],
        "support" => &["Return policy", "Warranty details", "Contact support"],
        _ => &["How does FlexCore work?", "Show me products", "Pricing"],
    }
}
