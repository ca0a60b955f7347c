//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init();

    // A subscriber may already be installed when embedded elsewhere
    if let Err(e) = result {
        eprintln!("tracing subscriber not installed: {e}");
    }
}
