//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the peer address shape before any dial is attempted
//! - Validate the logging filter directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CoreConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::comm::Endpoint;
use crate::config::schema::CoreConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration, collecting every error found.
pub fn validate_config(config: &CoreConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.peer.address.trim();
    if address.is_empty() {
        errors.push(ValidationError {
            field: "peer.address",
            message: "must not be empty".to_string(),
        });
    } else if let Err(e) = Endpoint::parse(address) {
        errors.push(ValidationError {
            field: "peer.address",
            message: format!("{} (expected host:port)", e),
        });
    }

    if config.peer.local_msp_id.trim().is_empty() {
        errors.push(ValidationError {
            field: "peer.local_msp_id",
            message: "must not be empty".to_string(),
        });
    }

    if let Err(e) = EnvFilter::try_new(&config.logging.level) {
        errors.push(ValidationError {
            field: "logging.level",
            message: format!("invalid filter '{}': {}", config.logging.level, e),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
