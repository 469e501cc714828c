use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "TAILCHECK_LOG";

static INIT: Once = Once::new();

/// Installs the stderr subscriber. Filter directives come from
/// `TAILCHECK_LOG` (e.g. `tailcheck::validator=debug`) and default to
/// `tailcheck=warn`. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("tailcheck=warn"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
        if installed.is_err() {
            // Another subscriber is already global; keep it.
            tracing::debug!("tracing subscriber already installed");
        }
    });
}
