//! Integration tests for the stock FlexBot responder.

use flexcore_intent::rules::flexbot_fallback;
use flexcore_intent::{Responder, contextual_suggestions};
use flexcore_kernel::{FixedRandom, SeededRandom, ThreadRandom};

fn flexbot() -> Responder {
    Responder::flexbot().expect("stock rule table is valid")
}

#[test]
fn cost_question_resolves_to_pricing() {
    let responder = flexbot();
    let reply = responder.respond("How much does it cost?", &mut FixedRandom::new(0));

    assert_eq!(reply.intent.as_deref(), Some("pricing"));
    assert!(reply.text.contains("$19.99"));
    assert!(reply.text.contains("Starter Kit"));
    assert_eq!(reply.suggestions.len(), 3);
}

#[test]
fn price_and_return_resolves_to_earliest_rule() {
    let responder = flexbot();
    let reply = responder.respond("Can I return it if the price drops?", &mut ThreadRandom);
    assert_eq!(reply.intent.as_deref(), Some("pricing"));
}

#[test]
fn unique_keywords_return_their_rule_exactly() {
    let responder = flexbot();
    let cases = [
        ("function", "how_it_works"),
        ("shipping", "shipping"),
        ("refund", "returns"),
        ("wide", "sizing"),
        ("cushion", "comfort"),
        ("durable", "durability"),
        ("fashion", "style"),
        ("gym", "sport"),
        ("recycled", "eco"),
        ("kids", "kids"),
        ("coupon", "discounts"),
        ("defect", "support"),
        ("versus", "comparison"),
        ("bulk", "business"),
        ("awesome", "thanks"),
        ("goodbye", "goodbye"),
        ("hello", "greeting"),
    ];

    for (input, expected) in cases {
        let reply = responder.respond(input, &mut FixedRandom::new(0));
        let rule = responder.rule(expected).unwrap();
        assert_eq!(reply.intent.as_deref(), Some(expected), "input {input:?}");
        assert_eq!(reply.text, rule.response);
        assert_eq!(reply.suggestions, rule.suggestions);
    }
}

#[test]
fn every_keyword_resolves_to_its_rule_or_an_earlier_one() {
    let responder = flexbot();
    let rules = responder.rules();

    for (idx, rule) in rules.iter().enumerate() {
        for keyword in &rule.keywords {
            let reply = responder.respond(keyword, &mut FixedRandom::new(0));
            let name = reply.intent.expect("keyword must match some rule");
            let winner = rules.iter().position(|r| r.name == name).unwrap();
            assert!(winner <= idx, "{keyword:?} resolved to later rule {name}");
        }
    }
}

#[test]
fn unmatched_input_returns_a_known_fallback() {
    let responder = flexbot();
    let known = flexbot_fallback();
    let mut random = SeededRandom::new(11);

    for input in ["zzz", "qwerty", "42"] {
        for _ in 0..8 {
            let reply = responder.respond(input, &mut random);
            assert!(reply.is_fallback());
            assert!(known.responses.contains(&reply.text));
            assert_eq!(reply.suggestions, known.suggestions);
        }
    }
}

#[test]
fn fixed_random_pins_fallback_variant() {
    let responder = flexbot();
    let known = flexbot_fallback();

    for idx in 0..known.responses.len() {
        let reply = responder.respond("zzz", &mut FixedRandom::new(idx));
        assert_eq!(reply.text, known.responses[idx]);
    }
}

#[test]
fn matching_is_case_insensitive() {
    let responder = flexbot();
    let lower = responder.respond("is it comfortable?", &mut FixedRandom::new(0));
    let upper = responder.respond("IS IT COMFORTABLE?", &mut FixedRandom::new(0));
    assert_eq!(lower, upper);
    assert_eq!(lower.intent.as_deref(), Some("comfort"));
}

#[test]
fn keyword_inside_longer_word_still_matches() {
    let responder = flexbot();
    // "hi" hides inside "chimney"; no earlier rule applies.
    let reply = responder.respond("chimney", &mut FixedRandom::new(0));
    assert_eq!(reply.intent.as_deref(), Some("greeting"));
}

#[test]
fn responder_is_stateless() {
    let responder = flexbot();
    let first = responder.respond("shipping?", &mut FixedRandom::new(0));
    let _ = responder.respond("hello", &mut FixedRandom::new(0));
    let again = responder.respond("shipping?", &mut FixedRandom::new(0));
    assert_eq!(first, again);
}

#[test]
fn contextual_suggestions_cover_support_section() {
    assert!(contextual_suggestions("support").contains(&"Warranty details"));
}
