//! Peer client subsystem.
//!
//! # Data Flow
//! ```text
//! PeerConfig (address, TLS, override name)
//!     → client.rs (PeerClient, fixed 3 s timeout)
//!     → endorser.rs (ProcessProposal + response classification)
//!     → admin.rs (GetStatus)
//! ```
//!
//! # Design Decisions
//! - PeerClient owns a ConnectionFactory instead of sharing base fields
//! - One attempt per call; no retries at any layer
//! - Errors carry typed context and are only rendered at the CLI

pub mod admin;
pub mod client;
pub mod endorser;
pub mod types;

pub use admin::AdminClient;
pub use client::{get_admin_client, get_endorser_client, PeerClient};
pub use endorser::{validate_response, EndorserClient};
pub use types::{PeerError, PeerResult};
