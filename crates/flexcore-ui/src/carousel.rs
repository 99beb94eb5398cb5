//! Testimonial carousel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
}

impl Testimonial {
    pub fn new(quote: &str, author: &str, role: &str) -> Self {
        Self {
            quote: quote.to_owned(),
            author: author.to_owned(),
            role: role.to_owned(),
        }
    }
}

/// Cycles through testimonials with wrap-around.  An empty carousel ignores
/// every navigation call.
#[derive(Debug, Clone, Default)]
pub struct TestimonialCarousel {
    items: Vec<Testimonial>,
    current: usize,
}

impl TestimonialCarousel {
    pub fn new(items: Vec<Testimonial>) -> Self {
        Self { items, current: 0 }
    }

    /// The testimonials shown on the landing page.
    pub fn flexcore() -> Self {
        Self::new(vec![
            Testimonial::new(
                "One base, four sports. My closet has never been this empty.",
                "Maya R.",
                "Weekend athlete",
            ),
            Testimonial::new(
                "Swapping cores takes seconds and the fit never changes.",
                "Jordan T.",
                "Soccer coach",
            ),
            Testimonial::new(
                "My kids outgrow cores, not whole shoes. Huge savings.",
                "Priya K.",
                "Parent of three",
            ),
        ])
    }

    pub fn current(&self) -> Option<&Testimonial> {
        self.items.get(self.current)
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next(&mut self) -> Option<&Testimonial> {
        if !self.items.is_empty() {
            self.current = (self.current + 1) % self.items.len();
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Testimonial> {
        if !self.items.is_empty() {
            self.current = (self.current + self.items.len() - 1) % self.items.len();
        }
        self.current()
    }

    /// Jump to `index`, wrapping if it is past the end.
    pub fn go_to(&mut self, index: usize) -> Option<&Testimonial> {
        if !self.items.is_empty() {
            self.current = index % self.items.len();
        }
        self.current()
    }
}
