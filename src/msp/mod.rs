//! Membership (identity) subsystem.
//!
//! # Data Flow
//! ```text
//! CORE_PEER_PRIVATE_KEY
//!     → signer.rs (key loading, identity serialization, signing)
//!     → types.rs (SerializedIdentity wire form, signature verification)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys

pub mod signer;
pub mod types;

pub use signer::{IdentitySigner, LocalSigner, PRIVATE_KEY_ENV_VAR};
pub use types::{verify_signature, IdentityError, SerializedIdentity};
