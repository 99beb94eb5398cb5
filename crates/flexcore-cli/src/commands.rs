//! One-shot subcommands: `ask`, `catalog`, `product`, `cart` and `tui`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use flexcore_store::{Cart, Catalog, NoticeLog};
use flexcore_ui::{MarkupStripper, PageState, ProductFilter, ProductModal};

use crate::helpers::{
    build_controller, build_responder, init_tracing, init_tracing_silent, modal_text,
    random_source, render_plain,
};
use crate::settings::Settings;

/// `flexcore ask <text...>`
pub fn cmd_ask(settings: &Settings, text: &[String], seed: Option<u64>) -> Result<()> {
    init_tracing(&settings.logging.level);

    let question = text.join(" ");
    let responder = build_responder()?;
    let mut random = random_source(seed);
    let reply = responder.respond(&question, random.as_mut());
    info!(intent = ?reply.intent, "answered");

    let stripper = MarkupStripper::new()?;
    println!("{}", render_plain(&reply.text, &stripper));
    if !reply.suggestions.is_empty() {
        println!();
        for suggestion in &reply.suggestions {
            println!("  > {suggestion}");
        }
    }
    Ok(())
}

/// `flexcore catalog [--filter <category>]`
pub fn cmd_catalog(settings: &Settings, filter: &str) -> Result<()> {
    init_tracing(&settings.logging.level);

    let cart_catalog = Catalog::cart_catalog();
    let detail_catalog = Catalog::detail_catalog();

    let shown = ProductFilter::new(settings.analytics_sink()).apply(filter, &cart_catalog);
    if shown.is_empty() {
        println!("No products in category `{filter}`.");
    } else {
        println!("{:<14} {:<14} {:<9} {:>8}", "ID", "NAME", "CATEGORY", "PRICE");
    }
    for product in shown.iter().filter_map(|id| cart_catalog.get(id)) {
        println!(
            "{:<14} {:<14} {:<9} {:>8}",
            product.id,
            product.name,
            product.category,
            product.price.to_string()
        );
    }

    let drift = cart_catalog.drift(&detail_catalog);
    println!();
    if drift.is_consistent() {
        println!("Catalogs agree.");
        return Ok(());
    }
    drift.log();
    for id in &drift.only_in_self {
        println!("  {id}: sold in the cart but has no detail page");
    }
    for id in &drift.only_in_other {
        println!("  {id}: has a detail page but cannot be added to the cart");
    }
    for m in &drift.price_mismatches {
        println!("  {}: cart {} vs detail {}", m.id, m.ours, m.theirs);
    }
    Ok(())
}

/// `flexcore product <id> [--add]`
pub fn cmd_product(settings: &Settings, id: &str, add: bool) -> Result<()> {
    init_tracing(&settings.logging.level);

    let analytics = settings.analytics_sink();
    let stripper = MarkupStripper::new()?;
    let mut modal = ProductModal::new(Arc::new(Catalog::detail_catalog()), analytics.clone());
    let mut page = PageState::default();

    let Some(html) = modal.open(id, &mut page) else {
        bail!("unknown product `{id}`");
    };
    println!("{}", modal_text(html, &stripper));

    if add {
        let mut cart = Cart::new(Arc::new(Catalog::cart_catalog()), analytics);
        match cart.add(id) {
            Some(_) => println!("\nIn cart: {} item(s), {}", cart.item_count(), cart.total()),
            None => println!("\n{id} is not sold through the cart yet."),
        }
    }

    modal.close(&mut page);
    Ok(())
}

/// `flexcore cart <ids...>`
pub fn cmd_cart(settings: &Settings, ids: &[String]) -> Result<()> {
    init_tracing(&settings.logging.level);

    let notices = Arc::new(NoticeLog::new());
    let mut cart = Cart::new(Arc::new(Catalog::cart_catalog()), settings.analytics_sink())
        .with_notifier(notices.clone())
        .with_notice_ttl(settings.widget.notice_ttl());

    for id in ids {
        if cart.add(id).is_none() {
            println!("  skipped unknown product `{id}`");
        }
    }
    for notice in notices.all() {
        println!("  {}", notice.text);
    }

    println!();
    for line in cart.lines() {
        let Some(product) = cart.catalog().get(&line.product_id) else {
            continue;
        };
        println!(
            "{:>3} x {:<14} {:>8}",
            line.quantity,
            product.name,
            (product.price * line.quantity).to_string()
        );
    }
    println!("Items: {}", cart.item_count());
    println!("Total: {}", cart.total());
    Ok(())
}

/// `flexcore tui`
pub async fn cmd_tui(settings: &Settings, export_dir: PathBuf) -> Result<()> {
    init_tracing_silent();

    let controller = build_controller(&settings.widget, settings.analytics_sink())?;
    flexcore_tui::run_tui(controller, settings.widget.clone(), export_dir)
        .await
        .context("terminal UI failed")
}
