//! Ordered keyword router.
//!
//! The router resolves free text to the index of the first registered rule
//! that has at least one keyword contained in the text:
//!
//! | Property | Behaviour |
//! |----------|-----------|
//! | Case | Keywords and input are lower-cased before matching |
//! | Granularity | Plain substring containment, no word boundaries |
//! | Within a rule | Any keyword is enough |
//! | Across rules | Lowest rule index wins |
//!
//! All keywords of all rules live in a single [`aho_corasick`] automaton, so
//! routing is one overlapping scan of the input regardless of rule count.
//!
//! # Example
//!
//! ```rust
//! # use flexcore_kernel::router::{KeywordRouter, RouteResult};
//! let mut router = KeywordRouter::new();
//! router.add_rule(["price", "cost"]).unwrap();
//! router.add_rule(["return", "refund"]).unwrap();
//!
//! let result = router.route("What does a return cost?");
//! assert!(matches!(result, RouteResult::Matched { rule: 0, .. }));
//! ```

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The outcome of routing a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteResult {
    /// At least one keyword matched.  `rule` is the lowest matching rule
    /// index.
    Matched {
        /// Index of the winning rule, in registration order.
        rule: usize,
        /// The keyword of that rule that was found in the text.
        keyword: String,
    },

    /// No keyword of any rule occurs in the text.
    Unmatched,
}

impl RouteResult {
    /// Return the winning rule index, if any.
    pub fn rule(&self) -> Option<usize> {
        match self {
            Self::Matched { rule, .. } => Some(*rule),
            Self::Unmatched => None,
        }
    }
}

/// One keyword and the rule it belongs to.
#[derive(Debug, Clone)]
struct KeywordRoute {
    keyword: String,
    rule: usize,
}

// ---------------------------------------------------------------------------
// KeywordRouter
// ---------------------------------------------------------------------------

/// First-wins substring router over ordered keyword rules.
///
/// The router is **not** `Clone` because it holds a compiled automaton.
/// Wrap in `Arc` if shared access is needed; routing only needs `&self`.
pub struct KeywordRouter {
    /// Every registered keyword (lowercased) tagged with its rule index.
    keywords: Vec<KeywordRoute>,

    /// The compiled automaton over `keywords`, rebuilt on every registration.
    automaton: Option<AhoCorasick>,

    /// Number of rules registered so far.
    rule_count: usize,
}

impl KeywordRouter {
    /// Create an empty router with no rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keywords: Vec::new(),
            automaton: None,
            rule_count: 0,
        }
    }

    /// Register the next rule and return its index.
    ///
    /// Keywords are lower-cased.  A rule without keywords, or with a blank
    /// keyword, is rejected and the router is left unchanged.
    pub fn add_rule<I, S>(&mut self, keywords: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rule = self.rule_count;
        let mut routes = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref();
            if keyword.trim().is_empty() {
                return Err(KernelError::InvalidKeyword {
                    rule,
                    keyword: keyword.to_owned(),
                });
            }
            routes.push(KeywordRoute {
                keyword: keyword.to_lowercase(),
                rule,
            });
        }

        if routes.is_empty() {
            return Err(KernelError::EmptyRule { rule });
        }

        tracing::debug!(rule, keywords = routes.len(), "keyword rule added");

        self.keywords.extend(routes);
        self.rule_count += 1;
        self.rebuild()?;

        Ok(rule)
    }

    /// Route the text to the first rule with a contained keyword.
    pub fn route(&self, text: &str) -> RouteResult {
        let Some(ac) = self.automaton.as_ref() else {
            return RouteResult::Unmatched;
        };

        let lowered = text.to_lowercase();

        // Overlapping search reports every keyword occurrence, including
        // keywords nested inside longer ones ("cheap" inside "cheaper"), so
        // the minimum rule index is exact.
        let mut best: Option<usize> = None;
        for mat in ac.find_overlapping_iter(&lowered) {
            let idx = mat.pattern().as_usize();
            let rule = self.keywords[idx].rule;
            if best.is_none_or(|b| rule < self.keywords[b].rule) {
                best = Some(idx);
                if rule == 0 {
                    break;
                }
            }
        }

        match best {
            Some(idx) => {
                let route = &self.keywords[idx];
                tracing::trace!(rule = route.rule, keyword = %route.keyword, "keyword matched");
                RouteResult::Matched {
                    rule: route.rule,
                    keyword: route.keyword.clone(),
                }
            }
            None => RouteResult::Unmatched,
        }
    }

    /// Return the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Return the number of registered keywords across all rules.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    // -- Private helpers ----------------------------------------------------

    /// Rebuild the Aho-Corasick automaton from the current keyword list.
    fn rebuild(&mut self) -> Result<()> {
        let patterns: Vec<&str> = self.keywords.iter().map(|k| k.keyword.as_str()).collect();

        let ac = AhoCorasick::new(&patterns).map_err(|e| {
            tracing::error!(error = %e, "failed to build aho-corasick automaton");
            KernelError::RouterBuildError {
                reason: e.to_string(),
            }
        })?;

        tracing::trace!(count = patterns.len(), "aho-corasick automaton rebuilt");
        self.automaton = Some(ac);
        Ok(())
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_is_case_insensitive() {
        let mut router = KeywordRouter::new();
        router.add_rule(["Shipping"]).unwrap();

        let result = router.route("SHIPPING options?");
        assert_eq!(
            result,
            RouteResult::Matched {
                rule: 0,
                keyword: "shipping".into()
            }
        );
    }

    #[test]
    fn match_is_substring_not_word() {
        let mut router = KeywordRouter::new();
        router.add_rule(["hi"]).unwrap();

        // "hi" inside "shipping" still counts.
        assert_eq!(router.route("shipping").rule(), Some(0));
    }

    #[test]
    fn earliest_rule_wins_regardless_of_position() {
        let mut router = KeywordRouter::new();
        router.add_rule(["price"]).unwrap();
        router.add_rule(["return"]).unwrap();

        assert_eq!(router.route("return it, what price?").rule(), Some(0));
        assert_eq!(router.route("return please").rule(), Some(1));
    }

    #[test]
    fn any_keyword_in_rule_is_enough() {
        let mut router = KeywordRouter::new();
        router.add_rule(["alpha", "beta", "gamma"]).unwrap();

        assert_eq!(router.route("only gamma here").rule(), Some(0));
    }

    #[test]
    fn nested_keywords_resolve_to_earliest_rule() {
        let mut router = KeywordRouter::new();
        router.add_rule(["cheap"]).unwrap();
        router.add_rule(["cheaper"]).unwrap();

        assert_eq!(router.route("anything cheaper?").rule(), Some(0));
    }

    #[test]
    fn unmatched_without_rules() {
        let router = KeywordRouter::new();
        assert_eq!(router.route("hello"), RouteResult::Unmatched);
    }

    #[test]
    fn unmatched_when_no_keyword_present() {
        let mut router = KeywordRouter::new();
        router.add_rule(["price"]).unwrap();
        assert_eq!(router.route("zzz"), RouteResult::Unmatched);
    }

    #[test]
    fn empty_rule_is_rejected() {
        let mut router = KeywordRouter::new();
        let result = router.add_rule(Vec::<String>::new());
        assert!(matches!(result, Err(KernelError::EmptyRule { rule: 0 })));
        assert_eq!(router.rule_count(), 0);
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let mut router = KeywordRouter::new();
        router.add_rule(["ok"]).unwrap();
        let result = router.add_rule(["fine", "  "]);
        assert!(matches!(
            result,
            Err(KernelError::InvalidKeyword { rule: 1, .. })
        ));
        assert_eq!(router.rule_count(), 1);
        assert_eq!(router.keyword_count(), 1);
    }

    #[test]
    fn counts_track_registrations() {
        let mut router = KeywordRouter::new();
        assert_eq!(router.add_rule(["a", "b"]).unwrap(), 0);
        assert_eq!(router.add_rule(["c"]).unwrap(), 1);
        assert_eq!(router.rule_count(), 2);
        assert_eq!(router.keyword_count(), 3);
    }
}
