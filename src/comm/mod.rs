//! Communication layer toward peer services.
//!
//! # Data Flow
//! ```text
//! ClientConfig (timeout, TLS roots)
//!     → client.rs (ConnectionFactory: dial, TLS, server-name override)
//!     → connection.rs (Connection: one JSON RPC per call)
//!     → typed stubs in crate::peer
//! ```
//!
//! # Design Decisions
//! - Every connection is fresh; nothing is pooled between calls
//! - Every dial and call has a deadline

use std::time::Duration;

pub mod client;
pub mod connection;

pub use client::{ClientConfig, ConnectionFactory, SecureOptions};
pub use connection::{Connection, ConnectionId, Endpoint, RpcError};

/// Deadline applied to every peer client connection and call.
///
/// Peer clients always use this value, whatever timeout the caller
/// configured, so administrative calls can never hang indefinitely.
pub const PEER_CLIENT_TIMEOUT: Duration = Duration::from_millis(3000);
