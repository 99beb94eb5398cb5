//! The FlexBot rule table.
//!
//! Rules are listed in priority order.  Pricing comes before the generic
//! "how does it work" rule so that "how much ..." questions reach pricing.

use crate::responder::{FallbackSet, IntentRule};

/// Greeting shown at the top of every transcript.
pub const GREETING: &str = "Hi there! Welcome to FlexCore! How can I help you today? 😊";

/// The stock FlexBot rules, highest priority first.
pub fn flexbot_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            "pricing",
            &["price", "cost", "expensive", "cheap", "money"],
            concat!(
                "Our pricing is designed to be super affordable! 💰<br><br>",
                "• <strong>Basic Bare:</strong> $19.99 (foundation shoe)<br>",
                "• <strong>Individual Cores:</strong> $19.99 each<br>",
                "• <strong>Starter Kit:</strong> $94.99 (Basic Bare + 2 cores - saves $14.98!)<br><br>",
                "Think about it - instead of buying 5 different pairs at $60+ each, ",
                "you get unlimited variety for under $100! 🎯",
            ),
            &[
                "Tell me about the starter kit",
                "What cores are available?",
                "Do you have sales?",
            ],
        ),
        IntentRule::new(
            "how_it_works",
            &["how", "work", "use", "function"],
            concat!(
                "Great question! FlexCore works through our innovative modular system:<br><br>",
                "🔧 <strong>Base Shoe:</strong> Start with our comfortable Basic Bare foundation<br>",
                "⚡ <strong>Snap-On Cores:</strong> Choose cores for your activity (running, casual, cleats, etc.)<br>",
                "🔄 <strong>Quick Switch:</strong> Change cores in seconds with our QuickLock™ system<br><br>",
                "It's like having 10 different shoes in one! Would you like to see our core collection?",
            ),
            &["Show me cores", "How much does it cost?", "Is it comfortable?"],
        ),
        IntentRule::new(
            "shipping",
            &["shipping", "delivery", "fast", "when", "arrive"],
            concat!(
                "We offer lightning-fast shipping! ⚡<br><br>",
                "📦 <strong>Standard Shipping:</strong> 3-5 business days (FREE on orders $50+)<br>",
                "🚀 <strong>Express Shipping:</strong> 1-2 business days ($9.99)<br>",
                "⚡ <strong>Same Day:</strong> Available in select cities ($19.99)<br><br>",
                "All orders ship within 24 hours, and you'll get tracking info immediately!",
            ),
            &[
                "Where do you ship?",
                "Can I track my order?",
                "Same day shipping areas",
            ],
        ),
        IntentRule::new(
            "returns",
            &["return", "exchange", "refund", "unhappy", "satisfied"],
            concat!(
                "We've got you covered with our <strong>Love It or Leave It</strong> guarantee! 💙<br><br>",
                "✅ <strong>30-day returns</strong> - no questions asked<br>",
                "✅ <strong>Free return shipping</strong><br>",
                "✅ <strong>Full refund</strong> or easy exchange<br>",
                "✅ <strong>Keep using</strong> while you decide<br><br>",
                "We're that confident you'll love FlexCore! Over 99% of customers keep their purchase. 😊",
            ),
            &[
                "How do I start a return?",
                "Exchange for different size",
                "What if cores don't fit?",
            ],
        ),
        IntentRule::new(
            "sizing",
            &["size", "sizing", "fit", "big", "small", "wide"],
            concat!(
                "Getting the perfect fit is crucial! 👟<br><br>",
                "📏 <strong>Size Range:</strong> US 5-15 (including half sizes)<br>",
                "📐 <strong>Width Options:</strong> Regular, Wide, Extra Wide<br>",
                "📱 <strong>Fit Finder:</strong> Use our AR app to scan your feet<br>",
                "📞 <strong>Personal Help:</strong> Our fit specialists are available 24/7<br><br>",
                "Pro tip: 94% of customers find their perfect fit using our size guide!",
            ),
            &["Open size guide", "Wide feet options", "What if size is wrong?"],
        ),
        IntentRule::new(
            "comfort",
            &["comfortable", "comfort", "hurt", "feet", "cushion", "support"],
            concat!(
                "Comfort is our #1 priority! 🌟<br><br>",
                "☁️ <strong>Memory foam insoles</strong> that adapt to your feet<br>",
                "🏃 <strong>Arch support</strong> designed by podiatrists<br>",
                "💨 <strong>Breathable materials</strong> keep feet cool<br>",
                "🔄 <strong>Flexibility</strong> moves naturally with your foot<br><br>",
                "Our customers regularly tell us these are the most comfortable shoes they've ever owned!",
            ),
            &[
                "What about arch support?",
                "Good for standing all day?",
                "Breathable for sports?",
            ],
        ),
        IntentRule::new(
            "durability",
            &["durable", "last", "wear out", "quality", "materials"],
            concat!(
                "Built to last! We use premium materials and rigorous testing. 💪<br><br>",
                "🔬 <strong>10,000+ step testing</strong> for each core design<br>",
                "🌧️ <strong>Weather resistant</strong> materials<br>",
                "♻️ <strong>Eco-friendly</strong> yet incredibly durable<br>",
                "🛡️ <strong>1-year warranty</strong> on all products<br><br>",
                "Average lifespan: 2-3 years with regular use (way longer than traditional shoes!)",
            ),
            &[
                "What's the warranty?",
                "Weather resistant details",
                "Eco-friendly materials",
            ],
        ),
        IntentRule::new(
            "style",
            &["colors", "style", "look", "fashion", "design", "aesthetic"],
            concat!(
                "Style meets functionality! 🎨<br><br>",
                "🌈 <strong>12+ color combinations</strong> for base shoes<br>",
                "✨ <strong>50+ core designs</strong> from minimalist to bold<br>",
                "🎯 <strong>Mix & match</strong> - create your unique style<br>",
                "👔 <strong>Professional to Athletic</strong> - one shoe does it all<br><br>",
                "Popular combos: Midnight Base + Neon Running Cores, White Base + Wood Casual Cores!",
            ),
            &[
                "Show popular combinations",
                "Professional styles",
                "Bright/bold options",
            ],
        ),
        IntentRule::new(
            "sport",
            &["sport", "athletic", "running", "gym", "exercise", "workout"],
            concat!(
                "FlexCore is perfect for athletes and fitness enthusiasts! 💪<br><br>",
                "🏃 <strong>Running Cores:</strong> Lightweight with responsive cushioning<br>",
                "⚽ <strong>Cleat Cores:</strong> Professional-grade traction<br>",
                "🏋️ <strong>Gym Cores:</strong> Stable base for lifting<br>",
                "🏀 <strong>Court Cores:</strong> Quick lateral movement support<br><br>",
                "Used by semi-pro athletes and weekend warriors alike!",
            ),
            &[
                "Running core details",
                "Best for gym workouts",
                "Professional athlete reviews",
            ],
        ),
        IntentRule::new(
            "eco",
            &["eco", "environment", "sustainable", "green", "recycled"],
            concat!(
                "We're committed to protecting our planet! 🌍<br><br>",
                "♻️ <strong>70% recycled materials</strong> in every product<br>",
                "🌱 <strong>Carbon-neutral shipping</strong><br>",
                "📦 <strong>Plastic-free packaging</strong><br>",
                "🔄 <strong>Modular design</strong> reduces waste by 60%<br><br>",
                "One FlexCore system replaces 5-10 traditional shoe purchases!",
            ),
            &[
                "Recycling program",
                "Carbon footprint details",
                "Sustainable materials",
            ],
        ),
        IntentRule::new(
            "kids",
            &["kids", "children", "child", "youth", "teen"],
            concat!(
                "Kids love FlexCore too! Perfect for growing feet. 👶<br><br>",
                "📏 <strong>Youth sizes:</strong> US 1-7<br>",
                "🎨 <strong>Fun designs:</strong> Glow-in-dark, LED, holographic<br>",
                "💡 <strong>Educational:</strong> Kids learn about modularity<br>",
                "💰 <strong>Cost-effective:</strong> One base grows with activity interests<br><br>",
                "Popular with parents - no more closets full of single-purpose shoes!",
            ),
            &["Youth sizing guide", "Fun core designs", "Parent reviews"],
        ),
        IntentRule::new(
            "discounts",
            &["discount", "sale", "coupon", "deal", "promo", "cheaper"],
            concat!(
                "I'd love to help you save! 💰<br><br>",
                "🎉 <strong>First-time buyers:</strong> 15% off with code FLEX15<br>",
                "📱 <strong>Newsletter signup:</strong> Get exclusive deals<br>",
                "🎁 <strong>Starter Kit:</strong> Already saves you $14.98!<br>",
                "👥 <strong>Refer friends:</strong> Both get 20% off<br><br>",
                "Plus, free shipping on orders over $50!",
            ),
            &["Apply FLEX15 code", "Refer a friend", "Newsletter signup"],
        ),
        IntentRule::new(
            "support",
            &["problem", "issue", "broken", "defect", "warranty", "complaint"],
            concat!(
                "I'm sorry you're having an issue! Let me help fix that right away. 🛠️<br><br>",
                "🔧 <strong>Quick fixes:</strong> 90% of issues resolve in minutes<br>",
                "📞 <strong>Direct support:</strong> Call us at 1-800-FLEXCORE<br>",
                "💬 <strong>Live chat:</strong> Available 24/7<br>",
                "🔄 <strong>Instant replacement:</strong> We ship before you send back<br><br>",
                "What specific issue are you experiencing? I can guide you through a solution!",
            ),
            &["Core won't attach", "Base shoe issues", "Sizing problems"],
        ),
        IntentRule::new(
            "comparison",
            &["compare", "vs", "versus", "difference", "better", "alternative"],
            concat!(
                "Great question! Here's how FlexCore stacks up: 📊<br><br>",
                "🆚 <strong>Traditional shoes:</strong> 1 purpose vs unlimited versatility<br>",
                "💰 <strong>Cost:</strong> $100 FlexCore vs $500+ for multiple shoes<br>",
                "🌍 <strong>Environmental:</strong> 60% less waste<br>",
                "🏠 <strong>Storage:</strong> 1 base + cores vs full shoe rack<br><br>",
                "What specific comparison are you curious about?",
            ),
            &["vs Nike/Adidas", "vs other modular shoes", "Cost breakdown"],
        ),
        IntentRule::new(
            "business",
            &["business", "bulk", "corporate", "team", "company"],
            concat!(
                "FlexCore for Business - perfect for teams! 🏢<br><br>",
                "👥 <strong>Volume discounts:</strong> 25%+ off for 50+ units<br>",
                "🎨 <strong>Custom branding:</strong> Add your logo<br>",
                "📋 <strong>Easy management:</strong> Single purchase, multiple uses<br>",
                "💼 <strong>Corporate accounts:</strong> Simplified billing<br><br>",
                "Used by tech companies, restaurants, hospitals, and more!",
            ),
            &[
                "Volume pricing",
                "Custom branding options",
                "Corporate account setup",
            ],
        ),
        IntentRule::new(
            "thanks",
            &["thanks", "thank you", "awesome", "great", "helpful", "amazing"],
            concat!(
                "You're so welcome! 😊 That totally made my day! <br><br>",
                "I'm here 24/7 whenever you need help with FlexCore. Whether it's picking the perfect cores, ",
                "tracking an order, or just chatting about our latest innovations!<br><br>",
                "Is there anything else I can help you with today? 🤖✨",
            ),
            &[
                "Browse products",
                "Check order status",
                "Learn about new features",
            ],
        ),
        IntentRule::new(
            "goodbye",
            &["bye", "goodbye", "see you", "later", "done", "finished"],
            concat!(
                "Thanks for chatting with me today! 👋<br><br>",
                "Remember, I'm always here if you need anything. Have an amazing day, ",
                "and welcome to the FlexCore family! 🎉<br><br>",
                "Transform every step! ✨",
            ),
            &["Start shopping", "Save this conversation", "Rate this chat"],
        ),
        IntentRule::new(
            "greeting",
            &["hello", "hi", "hey", "start", "begin"],
            concat!(
                "Hey there! Welcome to FlexCore! 🎉<br><br>",
                "I'm FlexBot, your personal shoe assistant. I'm here to help you discover ",
                "how our revolutionary modular system can transform your footwear game!<br><br>",
                "What would you like to know about FlexCore? I can help with products, sizing, ",
                "orders, or just chat about why modular shoes are the future! 😊",
            ),
            &["How does FlexCore work?", "Show me products", "Help me choose"],
        ),
    ]
}

/// The stock FlexBot fallback set.
pub fn flexbot_fallback() -> FallbackSet {
    FallbackSet {
        responses: vec![
            "That's a great question! 🤔 Could you tell me a bit more about what you're looking for? I'm here to help with anything FlexCore-related!".into(),
            "I want to make sure I give you the best answer! Could you rephrase that or let me know what specific aspect of FlexCore you're curious about?".into(),
            "Hmm, I'm not quite sure I understood that correctly. Are you asking about our products, ordering process, or something else? I'm here to help! 😊".into(),
            "I'd love to help you with that! Could you give me a bit more detail about what you're trying to find out about FlexCore?".into(),
        ],
        suggestions: vec![
            "How does it work?".into(),
            "Show products".into(),
            "Pricing info".into(),
            "Contact support".into(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_names_are_unique() {
        let rules = flexbot_rules();
        let names: HashSet<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn every_rule_offers_three_suggestions() {
        for rule in flexbot_rules() {
            assert_eq!(rule.suggestions.len(), 3, "rule {}", rule.name);
        }
    }

    #[test]
    fn pricing_precedes_how_it_works() {
        let rules = flexbot_rules();
        let pos = |name: &str| rules.iter().position(|r| r.name == name).unwrap();
        assert!(pos("pricing") < pos("how_it_works"));
        assert!(pos("pricing") < pos("returns"));
    }

    #[test]
    fn fallback_has_four_variants() {
        let fallback = flexbot_fallback();
        assert_eq!(fallback.responses.len(), 4);
        assert_eq!(fallback.suggestions.len(), 4);
    }
}
