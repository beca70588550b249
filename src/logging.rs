//! Tracing setup for binaries and tests.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! host's job. `RUST_LOG` overrides the default filter.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber on stderr. Idempotent; the first call wins.
pub fn init_tracing(default_filter: &str) {
    let default_filter = default_filter.to_string();
    TRACING_INIT.call_once(move || {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&default_filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();

        // Another subscriber may already be installed (test harnesses, embedders).
        let _ = subscriber.try_init();
    });
}

pub fn init_tracing_default() {
    init_tracing(DEFAULT_FILTER);
}
