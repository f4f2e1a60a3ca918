//! Tracing setup
//!
//! Logs go to stderr so the chat transcript on stdout stays clean.
//! `RUST_LOG` wins over the verbosity-derived default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Verbosity;

/// Filter directive for the given verbosity, honouring `RUST_LOG`
pub fn filter_directive(verbosity: Verbosity) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("medibuddy={}", verbosity.log_filter()))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity, color: bool) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(verbosity)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_from_verbosity() {
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(filter_directive(Verbosity::Normal), "medibuddy=warn");
            assert_eq!(filter_directive(Verbosity::VeryVerbose), "medibuddy=debug");
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::Quiet, false);
        init(Verbosity::Verbose, false);
    }
}
