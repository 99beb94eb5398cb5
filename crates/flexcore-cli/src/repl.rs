//! Subcommand: `flexcore chat` -- line-mode conversation.
//!
//! Drives the same controller as the terminal widget, one stdin line per
//! turn, waiting out the simulated typing delay before printing each reply.

use std::io::{self, BufRead, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use flexcore_kernel::FixedDelay;
use flexcore_tui::TuiController;
use flexcore_ui::{InputField, PendingReply};

use crate::helpers::{build_controller, init_tracing, render_plain};
use crate::settings::Settings;

/// What a single input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum LineCommand<'a> {
    Quit,
    Clear,
    Export,
    Say(&'a str),
    Skip,
}

fn classify(line: &str) -> LineCommand<'_> {
    match line.trim() {
        "" => LineCommand::Skip,
        "/quit" | "/exit" | "quit" | "exit" => LineCommand::Quit,
        "/clear" => LineCommand::Clear,
        "/export" => LineCommand::Export,
        text => LineCommand::Say(text),
    }
}

/// Run the line REPL.
pub async fn cmd_chat(settings: &Settings, no_delay: bool, export_dir: &Path) -> Result<()> {
    init_tracing(&settings.logging.level);

    let mut controller = build_controller(&settings.widget, settings.analytics_sink())?;
    if no_delay {
        controller = controller.with_delay(Box::new(FixedDelay::zero()));
    }
    controller.open();
    info!(no_delay, "chat session started");

    println!();
    println!("  FlexBot v{}", env!("CARGO_PKG_VERSION"));
    println!("  Commands: /clear, /export, /quit");
    println!();
    print_bot(&controller, controller.transcript().messages()[0].text.as_str());
    print_suggestions(&controller);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read input")?
            == 0
        {
            break;
        }

        match classify(&line) {
            LineCommand::Skip => continue,
            LineCommand::Quit => break,
            LineCommand::Clear => {
                controller.clear();
                println!("  (conversation cleared)");
            }
            LineCommand::Export => {
                let path = controller
                    .export()
                    .write_to(export_dir)
                    .context("failed to write transcript")?;
                println!("  (saved {})", path.display());
            }
            LineCommand::Say(text) => {
                let Some(input) = controller.input_mut() else {
                    continue;
                };
                input.set_text(text);
                if let Some(pending) = controller.submit_input() {
                    reply(&mut controller, pending).await;
                }
            }
        }
    }

    let usage = controller.usage();
    controller.close();
    info!(messages = usage.total, user = usage.user, "chat session ended");
    Ok(())
}

async fn reply(controller: &mut TuiController, pending: PendingReply) {
    if !pending.delay.is_zero() {
        println!("  FlexBot is typing...");
    }
    let Some(message) = controller.respond_after_delay(pending).await.cloned() else {
        return;
    };
    print_bot(controller, &message.text);
    print_suggestions(controller);
}

fn print_bot(controller: &TuiController, html: &str) {
    println!("flexbot>");
    println!("{}", render_plain(html, controller.stripper()));
}

fn print_suggestions(controller: &TuiController) {
    let suggestions = controller.suggestions();
    if !suggestions.is_empty() {
        println!("  try: {}", suggestions.join(" | "));
    }
    println!();
}
