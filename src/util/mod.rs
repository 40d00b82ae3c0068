use crate::core::prelude::*;
use tracing_subscriber::fmt::time::OffsetTime;

pub mod assert;
pub mod coerce;
pub mod linalg;

/// Installs a `tracing` subscriber writing to stderr, with UTC timestamps and source locations.
///
/// Fails if a global subscriber is already installed.
pub fn setup_log() -> anyhow::Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
