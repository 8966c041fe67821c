//! Log subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// Filter comes from `RUST_LOG`, default `info`
/// (e.g. `RUST_LOG=aqua_calc=debug`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Debug-level subscriber writing through the test harness; safe to call
/// from every test
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
