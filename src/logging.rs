//! Logging initialization.
//!
//! The library itself only emits `tracing` events; hosts that want them on a
//! console can call [`init_tracing`] once at startup, or install their own
//! subscriber instead.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize a tracing subscriber for structured logging.
///
/// Respects `RUST_LOG` when set; otherwise defaults to `extcmd=info,warn`
/// (or `extcmd=debug,info` with `verbose`). Verbose output includes targets
/// and span close events.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("extcmd=debug,info")
            } else {
                EnvFilter::try_new("extcmd=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).compact())
            .try_init()?;
    }

    Ok(())
}
