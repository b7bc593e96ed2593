//! Tracing setup for test runs.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,sockmock_expect=debug,sockmock_endpoint=debug";

/// Install a test-friendly subscriber.
///
/// Honours `RUST_LOG`, falling back to debug output for this workspace. Safe
/// to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        install(filter);
    });
}

/// Install a test-friendly subscriber with an explicit filter.
pub fn init_test_tracing_with_filter(filter: &str) {
    INIT.call_once(|| install(EnvFilter::new(filter)));
}

fn install(filter: EnvFilter) {
    // Another subscriber may already be global (e.g. set by the test binary).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}
