//! Peer administration client: builds, signs and submits channel join
//! proposals to a peer's Endorser service.

pub mod channel;
pub mod comm;
pub mod commands;
pub mod config;
pub mod msp;
pub mod observability;
pub mod peer;
pub mod protos;

pub use channel::{JoinConfig, JoinOperation};
pub use config::CoreConfig;
pub use peer::{PeerClient, PeerError, PeerResult};
