//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Resolve the effective filter directive
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr so command output on stdout stays clean
//! - Precedence: `--logging-level` flag, then `RUST_LOG`, then config

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when nothing else parses.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Pick the filter directive to use.
pub fn resolve_directive(flag: Option<&str>, env: Option<&str>, config_level: &str) -> String {
    flag.filter(|level| !level.trim().is_empty())
        .or_else(|| env.filter(|level| !level.trim().is_empty()))
        .unwrap_or(config_level)
        .to_string()
}

/// Initialize tracing with the resolved directive.
pub fn init(flag: Option<&str>, config_level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = resolve_directive(flag, env.as_deref(), config_level);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid logging level '{}': {}; using '{}'", directive, e, DEFAULT_DIRECTIVE);
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        assert_eq!(resolve_directive(Some("debug"), Some("warn"), "info"), "debug");
    }

    #[test]
    fn test_env_before_config() {
        assert_eq!(resolve_directive(None, Some("warn"), "info"), "warn");
        assert_eq!(resolve_directive(Some(""), Some("warn"), "info"), "warn");
    }

    #[test]
    fn test_config_fallback() {
        assert_eq!(resolve_directive(None, None, "error"), "error");
    }
}
