//! Tracing setup for the `dcart` binary.
//!
//! Cart mutations log at `debug`, completed checkouts at `info` and rejected
//! donor forms at `warn`. Output goes to stderr; stdout carries receipts and
//! JSON only.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much of the cart's activity to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Rejected submissions and other warnings.
    #[default]
    Normal,
    /// Completed checkouts.
    Verbose,
    /// Every cart mutation.
    Trace,
}

impl Verbosity {
    /// Map the `-q` flag and the `-v` count onto a level. `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level emitted at this verbosity.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Trace => Level::DEBUG,
        }
    }

    fn directive(self) -> String {
        format!("donationcart={}", self.level())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set and parseable, replaces the directive derived from
/// `verbosity`. Calling this twice keeps the first subscriber.
///
/// ```no_run
/// use donationcart::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
