use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Installs the fmt subscriber. `log` records from the library are bridged into it.
/// Unknown level names fall back to `info`; calling twice is harmless.
pub fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .try_init();
}
