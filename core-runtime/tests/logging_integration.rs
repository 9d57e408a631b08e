//! Integration tests for logging system

use bridge_traits::time::{BufferedLogger, LogLevel, LoggerSink};
use core_runtime::logging::{init_logging, redact_query, strip_path, LogFormat, LoggingConfig};
use core_runtime::Error;
use std::sync::Arc;

// The global subscriber can only be installed once per process, so a single
// test covers installation, forwarding and the second-call failure.
#[test]
fn test_global_subscriber_forwards_to_sink() {
    let sink = Arc::new(BufferedLogger::new(LogLevel::Debug));

    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug)
            .with_logger_sink(sink.clone() as Arc<dyn LoggerSink>),
    )
    .unwrap();

    tracing::debug!(target: "core_resources::loader", resource = "colors", "Loaded resource");
    tracing::trace!(target: "core_resources::loader", "filtered out");
    tracing::info!(target: "hyper::client", "filtered out");

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Loaded resource");
    assert_eq!(entries[0].fields.get("resource"), Some(&"colors".to_string()));

    let second = init_logging(LoggingConfig::default());
    assert!(matches!(second, Err(Error::Config(_))));
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_path_stripping() {
    assert_eq!(strip_path("/home/user/bundle/palettes/colors.json"), "colors.json");
    assert_eq!(strip_path("C:\\Users\\John\\bundle\\fonts.json"), "fonts.json");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_query_redaction() {
    assert_eq!(
        redact_query("https://api.example.com/v1/items?key=secret&page=2"),
        "https://api.example.com/v1/items"
    );
    assert_eq!(redact_query(""), "");
}
