//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default level filter.
///
/// `RUST_LOG` still takes precedence over `default_level` when it is set.
/// Unknown level names fall back to `info`.
pub fn init(default_level: &str) {
    builder(default_level).init();
}

/// Like [`init`], but tolerates a logger that is already installed (tests, embedding hosts)
pub fn try_init(default_level: &str) -> bool {
    builder(default_level).try_init().is_ok()
}

fn builder(default_level: &str) -> env_logger::Builder {
    let level = default_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    builder
}
