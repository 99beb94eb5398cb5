//! Intent responder -- maps raw user text to a canned reply.
//!
//! Resolution is a single pass:
//!
//! 1. **Rules**: every keyword of every [`IntentRule`] is matched as a
//!    case-insensitive substring via the kernel's [`KeywordRouter`].  The
//!    earliest-declared rule with any keyword present wins.
//! 2. **Fallback**: when nothing matches, one [`FallbackSet`] response is
//!    chosen uniformly through the injected [`RandomSource`].
//!
//! The responder keeps no state between calls and never consults
//! conversation history, so the same text always resolves to the same rule.

use serde::{Deserialize, Serialize};
use tracing::debug;

use flexcore_kernel::{KeywordRouter, RandomSource, RouteResult};

use crate::error::{IntentError, Result};
use crate::rules;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A static keyword-set-to-response mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    /// Diagnostic label (e.g. `"pricing"`), reported in [`Reply::intent`].
    pub name: String,
    /// Lowercase substrings; any one of them selects this rule.
    pub keywords: Vec<String>,
    /// HTML-bearing response text.
    pub response: String,
    /// Ordered quick-reply suggestions offered after the response.
    pub suggestions: Vec<String>,
}

impl IntentRule {
    /// Build a rule from borrowed parts.
    pub fn new(name: &str, keywords: &[&str], response: &str, suggestions: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            response: response.to_owned(),
            suggestions: suggestions.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Check the rule's own invariants.
    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| IntentError::InvalidRule {
            name: self.name.clone(),
            reason: reason.to_owned(),
        };

        if self.keywords.is_empty() {
            return Err(invalid("no keywords"));
        }
        if let Some(keyword) = self
            .keywords
            .iter()
            .find(|k| k.trim().is_empty() || k.to_lowercase() != **k)
        {
            return Err(invalid(&format!(
                "keyword `{keyword}` must be non-empty and lowercase"
            )));
        }
        if self.response.trim().is_empty() {
            return Err(invalid("empty response"));
        }
        Ok(())
    }
}

/// Responses used when no rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSet {
    /// Candidate responses; one is chosen uniformly per call.
    pub responses: Vec<String>,
    /// Suggestions shared by every fallback response.
    pub suggestions: Vec<String>,
}

/// Rules and fallback as one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules in priority order.
    pub rules: Vec<IntentRule>,
    /// Fallback used when no rule matches.
    pub fallback: FallbackSet,
}

/// What the responder produced for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// HTML-bearing response text.
    pub text: String,
    /// Ordered quick-reply suggestions.
    pub suggestions: Vec<String>,
    /// Name of the matched rule; `None` for fallback replies.
    pub intent: Option<String>,
}

impl Reply {
    /// Whether this reply came from the fallback set.
    pub fn is_fallback(&self) -> bool {
        self.intent.is_none()
    }
}

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

/// Ordered first-wins intent responder.
pub struct Responder {
    /// Rules in priority order; index `i` is router rule `i`.
    rules: Vec<IntentRule>,

    /// Compiled keyword automaton over `rules`.
    router: KeywordRouter,

    /// Responses for unmatched input.
    fallback: FallbackSet,
}

impl Responder {
    /// Build a responder from a rule table.
    ///
    /// Fails if any rule is malformed or the fallback set is empty.
    pub fn new(rules: Vec<IntentRule>, fallback: FallbackSet) -> Result<Self> {
        if fallback.responses.is_empty() {
            return Err(IntentError::EmptyFallback);
        }

        let mut router = KeywordRouter::new();
        for rule in &rules {
            rule.validate()?;
            router.add_rule(&rule.keywords)?;
        }

        debug!(
            rules = router.rule_count(),
            keywords = router.keyword_count(),
            fallbacks = fallback.responses.len(),
            "responder built"
        );

        Ok(Self {
            rules,
            router,
            fallback,
        })
    }

    /// Build the stock FlexBot responder.
    pub fn flexbot() -> Result<Self> {
        Self::new(rules::flexbot_rules(), rules::flexbot_fallback())
    }

    /// Build a responder from a JSON [`RuleTable`] document.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: RuleTable = serde_json::from_str(json)?;
        Self::new(table.rules, table.fallback)
    }

    /// Produce the reply for `text`.
    ///
    /// `random` is consulted only when no rule matches.
    pub fn respond(&self, text: &str, random: &mut dyn RandomSource) -> Reply {
        match self.router.route(text) {
            RouteResult::Matched { rule, keyword } => {
                let rule = &self.rules[rule];
                debug!(intent = %rule.name, keyword = %keyword, "intent matched");
                Reply {
                    text: rule.response.clone(),
                    suggestions: rule.suggestions.clone(),
                    intent: Some(rule.name.clone()),
                }
            }
            RouteResult::Unmatched => {
                let idx = random.next_index(self.fallback.responses.len());
                debug!(variant = idx, "no intent matched, using fallback");
                Reply {
                    text: self.fallback.responses[idx].clone(),
                    suggestions: self.fallback.suggestions.clone(),
                    intent: None,
                }
            }
        }
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&IntentRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// The fallback set.
    pub fn fallback(&self) -> &FallbackSet {
        &self.fallback
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use flexcore_kernel::FixedRandom;

    fn small_table() -> (Vec<IntentRule>, FallbackSet) {
        let rules = vec![
            IntentRule::new("first", &["alpha", "beta"], "first response", &["a", "b"]),
            IntentRule::new("second", &["gamma"], "second response", &["c"]),
        ];
        let fallback = FallbackSet {
            responses: vec!["fb0".into(), "fb1".into(), "fb2".into()],
            suggestions: vec!["help".into()],
        };
        (rules, fallback)
    }

    #[test]
    fn unique_keyword_returns_rule_exactly() {
        let (rules, fallback) = small_table();
        let responder = Responder::new(rules, fallback).unwrap();

        let reply = responder.respond("GAMMA rays", &mut FixedRandom::new(0));
        assert_eq!(reply.text, "second response");
        assert_eq!(reply.suggestions, vec!["c"]);
        assert_eq!(reply.intent.as_deref(), Some("second"));
        assert!(!reply.is_fallback());
    }

    #[test]
    fn earlier_rule_wins_tie() {
        let (rules, fallback) = small_table();
        let responder = Responder::new(rules, fallback).unwrap();

        let reply = responder.respond("gamma and beta", &mut FixedRandom::new(0));
        assert_eq!(reply.intent.as_deref(), Some("first"));
    }

    #[test]
    fn fallback_uses_injected_random() {
        let (rules, fallback) = small_table();
        let responder = Responder::new(rules, fallback).unwrap();

        let reply = responder.respond("nothing here", &mut FixedRandom::new(2));
        assert_eq!(reply.text, "fb2");
        assert_eq!(reply.suggestions, vec!["help"]);
        assert!(reply.is_fallback());
    }

    #[test]
    fn empty_input_falls_back() {
        let (rules, fallback) = small_table();
        let responder = Responder::new(rules, fallback).unwrap();
        assert!(responder.respond("", &mut FixedRandom::new(0)).is_fallback());
    }

    #[test]
    fn empty_fallback_is_rejected() {
        let (rules, _) = small_table();
        let fallback = FallbackSet {
            responses: vec![],
            suggestions: vec![],
        };
        assert!(matches!(
            Responder::new(rules, fallback),
            Err(IntentError::EmptyFallback)
        ));
    }

    #[test]
    fn uppercase_keyword_is_rejected() {
        let (_, fallback) = small_table();
        let rules = vec![IntentRule::new("bad", &["Price"], "x", &[])];
        assert!(matches!(
            Responder::new(rules, fallback),
            Err(IntentError::InvalidRule { .. })
        ));
    }

    #[test]
    fn rule_without_keywords_is_rejected() {
        let (_, fallback) = small_table();
        let rules = vec![IntentRule::new("bad", &[], "x", &[])];
        assert!(Responder::new(rules, fallback).is_err());
    }

    #[test]
    fn empty_response_is_rejected() {
        let (_, fallback) = small_table();
        let rules = vec![IntentRule::new("bad", &["ok"], "  ", &[])];
        assert!(Responder::new(rules, fallback).is_err());
    }

    #[test]
    fn from_json_builds_responder() {
        let json = r#"{
            "rules": [
                {"name": "hours", "keywords": ["open"], "response": "9 to 5", "suggestions": []}
            ],
            "fallback": {"responses": ["pardon?"], "suggestions": ["hours"]}
        }"#;
        let responder = Responder::from_json(json).unwrap();
        let reply = responder.respond("When are you open?", &mut FixedRandom::new(0));
        assert_eq!(reply.text, "9 to 5");
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            Responder::from_json("not json"),
            Err(IntentError::Json(_))
        ));
    }

    #[test]
    fn rule_lookup_by_name() {
        let (rules, fallback) = small_table();
        let responder = Responder::new(rules, fallback).unwrap();
        assert!(responder.rule("second").is_some());
        assert!(responder.rule("missing").is_none());
    }
}
