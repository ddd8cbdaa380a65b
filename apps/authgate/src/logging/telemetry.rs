//! Process-wide log subscriber for the server binary.
//!
//! Lines are JSON with event fields flattened and the enclosing `request`
//! span attached, so every line written while serving a request carries its
//! `trace_id`, `method` and `path`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,actix_web=info";

/// Pick the filter directive: `AUTHGATE_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Blank values are skipped.
pub fn resolve_filter(authgate_log: Option<&str>, rust_log: Option<&str>) -> String {
    [authgate_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the JSON subscriber. Safe to call more than once; later calls are
/// no-ops.
pub fn init_tracing() {
    let directive = resolve_filter(
        std::env::var("AUTHGATE_LOG").ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
    );
    let env_filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
