//! Channel operations.
//!
//! # Data Flow
//! ```text
//! genesis block file
//!     → join.rs build_join_spec (cscc / JoinChain)
//!     → protos::utils (proposal + signature)
//!     → peer::EndorserClient (single ProcessProposal)
//!     → peer::validate_response
//! ```

pub mod join;

pub use join::{build_join_spec, JoinConfig, JoinOperation, JoinState, JOIN_SUCCESS_MESSAGE};
