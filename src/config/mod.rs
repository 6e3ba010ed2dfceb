//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! core.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (CORE_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → CoreConfig (validated, immutable)
//!     → handed by reference to the peer client and commands
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CoreConfig;
pub use schema::LoggingConfig;
pub use schema::PeerConfig;
pub use schema::TlsConfig;
