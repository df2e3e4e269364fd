//! Logging bootstrap

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an explicit `tracing` filter directive
pub const LOG_ENV: &str = "MOODLOG_LOG";

/// Filter directive used when `MOODLOG_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "moodlog=debug"
    } else {
        "warn"
    }
}

/// Initialise the global `tracing` subscriber, writing to stderr so command
/// output on stdout stays clean.
pub fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    let layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "moodlog=debug");
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
    }
}
