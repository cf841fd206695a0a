pub mod paths;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV_VAR: &str = "BUDGET_TRACKER_LOG";
const DEFAULT_FILTER: &str = "budget_tracker=warn";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, honouring `BUDGET_TRACKER_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber may already be installed by an embedding application.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
