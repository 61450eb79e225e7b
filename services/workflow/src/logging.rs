use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `LOG_FORMAT=json` selects JSON lines, anything else the human-readable
/// formatter (the default for the demo binaries). Both write to stderr,
/// leaving stdout to program output. Filtering follows `RUST_LOG`,
/// defaulting to `workflow=info`.
pub fn init() {
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "workflow=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // A second init (tests, embedding hosts) keeps the existing subscriber.
    let result = if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            log_format = if use_json { "json" } else { "text" },
            "Logging initialized"
        );
    }
}
