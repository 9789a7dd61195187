//! # quote-cli
//!
//! Prices one quote request and prints the result as JSON.
//!
//! ## Usage
//! ```text
//! quote-cli request.json
//! cat request.json | quote-cli -
//! ```
//!
//! ## Startup Sequence
//! 1. Load configuration (defaults, `pressquote.toml`, `PRESSQUOTE_*`)
//! 2. Initialize tracing (to stderr, stdout carries the JSON)
//! 3. Resolve the rate card (configured file, else the standard card)
//! 4. Parse and validate the request
//! 5. Price it and print the response

mod request;
mod response;
mod settings;

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pressquote_core::{compare_modes, RateCard};

use crate::request::QuoteRequest;
use crate::response::QuoteResponse;
use crate::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log_filter);

    info!(
        offset_threshold = settings.offset_threshold,
        rate_card = ?settings.rate_card_path,
        "Configuration loaded"
    );

    let Some(source) = std::env::args().nth(1) else {
        bail!("usage: quote-cli <request.json | ->");
    };

    let payload = read_input(&source)?;
    let request: QuoteRequest =
        serde_json::from_str(&payload).context("request is not a valid quote request")?;

    let custom_card = match settings.load_rate_card() {
        Ok(card) => card,
        Err(e) => {
            warn!(error = %e, "Rate card unusable, falling back to the standard card");
            None
        }
    };
    let card = select_rate_card(custom_card.as_ref());

    let job = request
        .to_job(&card.validation)
        .context("invalid quote request")?;

    let comparison = compare_modes(&job, request.print_mode, card, settings.offset_threshold);
    info!(
        quantity = job.quantity,
        requested = ?comparison.requested,
        recommended = ?comparison.recommended,
        effective = ?comparison.effective,
        total = %comparison.primary().total_price,
        "Quote priced"
    );

    let response = QuoteResponse::new(&request, comparison);
    let json = if settings.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// The configured rate card, else the standard one.
fn select_rate_card(custom: Option<&RateCard>) -> &RateCard {
    custom.unwrap_or_else(|| RateCard::global())
}

/// Reads the request from a file, or from stdin for `-`.
fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(source).with_context(|| format!("failed to read request file {source}"))
}
