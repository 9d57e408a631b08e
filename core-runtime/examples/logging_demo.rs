//! Logging system demonstration
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format with a custom filter
//! cargo run --example logging_demo -- compact "logging_demo=trace"
//! ```

use bridge_traits::time::LogLevel;
use core_runtime::decode::decode_json;
use core_runtime::logging::{init_logging, redact_query, strip_path, LogFormat, LoggingConfig};
use serde::Deserialize;
use std::env;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Swatch {
    name: String,
    hex: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core_runtime::Result<()> {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true);

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    init_logging(config)?;
    info!(format = ?format, "Logging initialized");

    load_swatches("/Users/me/App.app/Resources/palettes/colors.json").await;

    let url = "https://api.example.com/v1/releases?api_key=secret";
    info!(url = redact_query(url), "Query strings never reach the log");

    Ok(())
}

#[instrument(skip(path))]
async fn load_swatches(path: &'static str) {
    let file = strip_path(path);
    debug!(file, "Decoding bundled resource");

    let body = br##"[{"name": "red", "hex": "#f00"}, {"name": "blue"}]"##;
    match decode_json::<Vec<Swatch>>(body) {
        Ok(swatches) => info!(file, count = swatches.len(), "Decoded"),
        Err(e) => warn!(file, path = %e.path(), error = e.description(), "Decode failed"),
    }
}
