//! Scroll-triggered reveal animations.
//!
//! Fade-in and slide-in elements start hidden and are revealed the first
//! time at least [`REVEAL_THRESHOLD`] of their height sits inside the
//! viewport, with the viewport's bottom edge pulled up by
//! [`REVEAL_BOTTOM_MARGIN`].  Once revealed an element stays revealed.

use tracing::debug;

/// Fraction of an element that must be in view before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Pixels trimmed off the bottom of the viewport.
pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;

/// Entrance animation applied on reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStyle {
    FadeIn,
    SlideInLeft,
    SlideInRight,
}

/// An animated element, positioned by its absolute top offset.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealElement {
    pub id: String,
    pub style: RevealStyle,
    pub top: f64,
    pub height: f64,
    visible: bool,
}

impl RevealElement {
    pub fn new(id: impl Into<String>, style: RevealStyle, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            style,
            top,
            height: height.max(0.0),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Fraction of the element inside `[view_top, view_bottom)`.
    fn visible_ratio(&self, view_top: f64, view_bottom: f64) -> f64 {
        if self.height == 0.0 {
            let inside = self.top >= view_top && self.top < view_bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = (self.top + self.height).min(view_bottom) - self.top.max(view_top);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

/// Tracks which reveal elements have entered the viewport.
#[derive(Debug, Default)]
pub struct RevealTracker {
    elements: Vec<RevealElement>,
}

impl RevealTracker {
    pub fn new(elements: Vec<RevealElement>) -> Self {
        Self { elements }
    }

    /// Reveal every element now sufficiently in view and return the ids
    /// revealed by this call.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_height: f64) -> Vec<String> {
        let view_top = scroll_y;
        let view_bottom = scroll_y + (viewport_height - REVEAL_BOTTOM_MARGIN).max(0.0);

        let mut revealed = Vec::new();
        for element in self.elements.iter_mut().filter(|e| !e.visible) {
            if element.visible_ratio(view_top, view_bottom) >= REVEAL_THRESHOLD {
                element.visible = true;
                debug!(element = %element.id, style = ?element.style, "revealed");
                revealed.push(element.id.clone());
            }
        }
        revealed
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id && e.visible)
    }

    pub fn elements(&self) -> &[RevealElement] {
        &self.elements
    }

    /// Number of elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.elements.iter().filter(|e| !e.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        RevealTracker::new(vec![
            RevealElement::new("hero-copy", RevealStyle::FadeIn, 100.0, 200.0),
            RevealElement::new("feature-left", RevealStyle::SlideInLeft, 1000.0, 400.0),
            RevealElement::new("feature-right", RevealStyle::SlideInRight, 2000.0, 400.0),
        ])
    }

    #[test]
    fn reveals_elements_in_view_on_load() {
        let mut t = tracker();
        assert_eq!(t.on_scroll(0.0, 800.0), vec!["hero-copy"]);
        assert!(t.is_visible("hero-copy"));
        assert_eq!(t.pending(), 2);
    }

    #[test]
    fn threshold_counts_the_bottom_margin() {
        let mut t = tracker();
        // Viewport 0..1090 shrinks to 0..1040: 40 px of 400 is exactly 10%.
        assert!(t.on_scroll(0.0, 1089.0).iter().all(|id| id.as_str() != "feature-left"));
        assert!(!t.is_visible("feature-left"));
        assert!(t.on_scroll(0.0, 1090.0).contains(&"feature-left".to_owned()));
    }

    #[test]
    fn just_below_threshold_stays_hidden() {
        let mut t = tracker();
        // 39 px of 400 visible.
        t.on_scroll(0.0, 1089.0);
        assert!(!t.is_visible("feature-left"));
        // Scrolling one more pixel crosses 10%.
        t.on_scroll(1.0, 1089.0);
        assert!(t.is_visible("feature-left"));
    }

    #[test]
    fn revealed_elements_stay_revealed() {
        let mut t = tracker();
        t.on_scroll(1800.0, 800.0);
        assert!(t.is_visible("feature-right"));

        // Back to the top: nothing is un-revealed or reported again.
        assert!(t.on_scroll(0.0, 800.0).contains(&"hero-copy".to_owned()));
        assert!(t.is_visible("feature-right"));
        assert!(t.on_scroll(1800.0, 800.0).is_empty());
    }

    #[test]
    fn scrolled_past_element_is_not_revealed() {
        let mut t = tracker();
        t.on_scroll(5000.0, 800.0);
        assert_eq!(t.pending(), 3);
    }

    #[test]
    fn zero_height_element_reveals_when_top_in_view() {
        let mut t = RevealTracker::new(vec![RevealElement::new(
            "divider",
            RevealStyle::FadeIn,
            500.0,
            0.0,
        )]);
        assert!(t.on_scroll(0.0, 500.0).is_empty());
        assert_eq!(t.on_scroll(0.0, 600.0), vec!["divider"]);
    }
}
