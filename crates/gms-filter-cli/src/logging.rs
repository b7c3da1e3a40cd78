//! Log setup for the binary. `RUST_LOG`, when set, overrides `--log-level`.

use log::LevelFilter;

#[cfg(not(feature = "tracing"))]
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
}

/// With `tracing`, span-close events carry per-phase timings; `log` records
/// from the library are bridged into the same subscriber.
#[cfg(feature = "tracing")]
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .finish()
        .try_init();
    Ok(())
}

/// `EnvFilter` directive equivalent to `level`.
#[cfg(feature = "tracing")]
fn default_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;

    #[test]
    fn level_maps_to_env_filter_directive() {
        assert_eq!(default_directive(LevelFilter::Debug), "debug");
        assert_eq!(default_directive(LevelFilter::Off), "off");
        let directive = default_directive(LevelFilter::Warn);
        assert!(tracing_subscriber::EnvFilter::try_new(directive).is_ok());
    }
}
