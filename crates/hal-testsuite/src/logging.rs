//! `tracing` subscriber setup for test runs.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::SuiteConfig;

/// Build the filter: `RUST_LOG` wins, then `default_filter`, then `info`
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_or_fallback(from_env.as_deref(), default_filter)
}

fn filter_or_fallback(from_env: Option<&str>, default_filter: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install a fmt subscriber writing through the test harness's capture.
///
/// Returns `false` when a global subscriber was already installed, which is
/// the normal case for every test after the first.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}

/// [`init`] with the filter from a suite configuration
pub fn init_from_config(config: &SuiteConfig) -> bool {
    init(&config.log_filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let _ = init("debug");
        assert!(!init("debug"));
        assert!(!init_from_config(&SuiteConfig::default()));
    }

    mod fallback_tests {
        use super::*;

        #[test]
        fn test_bad_default_falls_back_to_info() {
            let filter = filter_or_fallback(None, "hal_testsuite=loudest");
            assert_eq!(filter.to_string(), "info");
        }

        #[test]
        fn test_default_used_without_env() {
            let filter = filter_or_fallback(None, "hal_testsuite=debug");
            assert_eq!(filter.to_string(), "hal_testsuite=debug");
        }

        #[test]
        fn test_env_wins_over_default() {
            let filter = filter_or_fallback(Some("warn"), "debug");
            assert_eq!(filter.to_string(), "warn");
        }

        #[test]
        fn test_bad_env_uses_default() {
            let filter = filter_or_fallback(Some("hal_testsuite=loudest"), "debug");
            assert_eq!(filter.to_string(), "debug");
        }
    }
}
