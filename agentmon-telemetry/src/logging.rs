//! Structured logging with `tracing`.
//!
//! Log level comes from `RUST_LOG` and falls back to `info`.

use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        Self::init_with(DEFAULT_DIRECTIVE)
    }

    /// Installs the global subscriber. `default_directive` is used when
    /// `RUST_LOG` is unset or invalid. A second call is a no-op.
    pub fn init_with(default_directive: &str) {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_directive)),
            )
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::ENTER)
            .try_init();
    }

    /// Emits a configuration event inside a span named after its kind.
    pub fn log_event(event_type: &str, detail: &str) {
        let span = info_span!("config_event", event_type = event_type);
        let _entered = span.enter();
        tracing::info!(detail = detail, "Configuration event");
    }
}
