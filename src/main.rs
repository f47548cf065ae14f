//! Swap Quote Engine — Entry Point
//!
//! Interactive terminal front end for the quote session. Reads one
//! command per line from stdin and prints the quote after every change.
//!
//! Wiring sequence:
//! 1. Load config (path from first argument, default `config.toml`) + validate
//! 2. Init tracing (JSON structured logging on stderr)
//! 3. Create HttpPriceFeed → PriceCatalog (PriceFeed port)
//! 4. Create SimulatedSettlement (SwapSettlement port)
//! 5. Create QuoteSession and run the initial catalog load
//! 6. Event loop: stdin commands vs. debounced amount commits vs. SIGINT

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};

use swap_quote_engine::adapters::feeds::HttpPriceFeed;
use swap_quote_engine::adapters::settlement::SimulatedSettlement;
use swap_quote_engine::config;
use swap_quote_engine::domain::rate::format_currency;
use swap_quote_engine::usecases::{PriceCatalog, QuoteSession, QuoteView, Side};

const HELP: &str = "\
commands:
  <amount>              type an amount (e.g. 12.5)
  amount <text>         same, explicit
  from <SYMBOL>         select the token to pay with
  to <SYMBOL>           select the token to receive
  flip                  exchange the two tokens
  tokens [from|to] [q]  list selectable tokens, optionally filtered
  submit                confirm the swap
  reload                fetch prices again
  show                  print the current quote
  json                  print the current quote as JSON
  help                  this text
  quit                  exit";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&path).context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        feed = %config.feed.url,
        "Starting swap quote engine"
    );

    // ── 3. Price feed + catalog loader ──────────────────────
    let feed = Arc::new(HttpPriceFeed::new(&config.feed).context("Failed to create price feed")?);
    let catalog = PriceCatalog::new(feed);

    // ── 4. Settlement ───────────────────────────────────────
    let settlement = Arc::new(SimulatedSettlement::from_config(&config.settlement));

    // ── 5. Session + initial load ───────────────────────────
    let mut session = QuoteSession::new(settlement, &config.session);
    render(&session.view());
    session.load(&catalog).await;
    render(&session.view());
    println!("type `help` for commands");

    // ── 6. Event loop ───────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("SIGINT received, shutting down");
                break;
            }
            () = session.settle_input() => {
                render(&session.view());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if !handle_command(&mut session, &catalog, line.trim()).await {
                    break;
                }
            }
        }
    }

    session.unmount();
    info!("Shutdown complete");
    Ok(())
}

/// Apply one command line. Returns `false` to exit.
async fn handle_command(
    session: &mut QuoteSession<SimulatedSettlement>,
    catalog: &PriceCatalog<HttpPriceFeed>,
    line: &str,
) -> bool {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return true;
    };
    let arg = words.next();

    match (command, arg) {
        ("quit" | "exit", _) => return false,
        ("help", _) => println!("{HELP}"),
        ("show", _) => render(&session.view()),
        ("json", _) => match serde_json::to_string_pretty(&session.view()) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize quote view"),
        },
        ("flip", _) => {
            session.swap_direction();
            render(&session.view());
        }
        ("from", Some(symbol)) => select(session, Side::Source, symbol),
        ("to", Some(symbol)) => select(session, Side::Target, symbol),
        ("amount", text) => enter_amount(session, text.unwrap_or_default()),
        ("tokens", side) => {
            let (side, query) = match side {
                Some("from") => (Side::Source, words.next()),
                Some("to") => (Side::Target, words.next()),
                query => (Side::Source, query),
            };
            list_tokens(session, side, query.unwrap_or_default());
        }
        ("reload", _) => {
            session.load(catalog).await;
            render(&session.view());
        }
        ("submit", _) => submit(session).await,
        (text, None) if text.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            enter_amount(session, text);
        }
        _ => println!("unknown command `{line}`, type `help`"),
    }
    true
}

fn enter_amount(session: &mut QuoteSession<SimulatedSettlement>, text: &str) {
    if !session.set_amount_text(text) {
        println!("`{text}` is not a valid amount");
    }
}

fn select(session: &mut QuoteSession<SimulatedSettlement>, side: Side, symbol: &str) {
    match session.select(side, &symbol.to_uppercase()) {
        Ok(()) => render(&session.view()),
        Err(e) => println!("{e}"),
    }
}

fn list_tokens(session: &QuoteSession<SimulatedSettlement>, side: Side, query: &str) {
    let candidates = match side {
        Side::Source => session.source_candidates(query),
        Side::Target => session.target_candidates(query),
    };
    if candidates.is_empty() {
        println!("no tokens found");
        return;
    }
    for asset in candidates {
        println!("  {:<10} ${}", asset.symbol, format_currency(asset.unit_price, 2, 6));
    }
}

async fn submit(session: &mut QuoteSession<SimulatedSettlement>) {
    // Commit whatever is typed before validating.
    if session.has_pending_input() {
        session.settle_input().await;
    }
    match session.submit().await {
        Ok(confirmation) => println!("{}", confirmation.message),
        Err(e) => {
            warn!(error = %e, "Swap not completed");
            println!("{e}");
        }
    }
    render(&session.view());
}

fn render(view: &QuoteView) {
    if view.is_loading {
        println!("loading prices...");
        return;
    }
    if let Some(error) = &view.error {
        println!("{error} (type `reload` to retry)");
        return;
    }

    let source = view.source.as_deref().unwrap_or("-");
    let target = view.target.as_deref().unwrap_or("-");
    println!("you pay:     {:<16} {source}", view.draft_amount_text);
    if let Some(usd) = &view.usd_estimate {
        println!("             {usd}");
    }
    println!("you receive: {:<16} {target}", view.output_display);
    if let Some(rate) = &view.rate_display {
        println!("rate:        {rate}");
        if let (Some(from), Some(to)) = (&view.source_price_display, &view.target_price_display) {
            println!("             price from {from}, price to {to}");
        }
    }
    if view.is_same_asset {
        println!("warning:     cannot swap the same token");
    }
    if view.is_invalid_amount {
        println!("warning:     please enter a valid amount");
    }
    println!("ready:       {}", if view.is_valid { "yes" } else { "no" });
}
