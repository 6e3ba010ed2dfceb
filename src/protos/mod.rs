//! Wire messages exchanged with the peer.
//!
//! # Data Flow
//! ```text
//! ChaincodeSpec
//!     → ChaincodeInvocationSpec (chaincode.rs)
//!     → Proposal (proposal.rs, built by utils.rs with creator + nonce)
//!     → SignedProposal (exact proposal bytes + signature)
//!     → Endorser
//!     → ProposalResponse (response.rs)
//! ```
//!
//! All messages are JSON encoded; byte fields travel as 0x-prefixed hex.

pub mod chaincode;
pub mod proposal;
pub mod response;
pub mod utils;

pub use chaincode::{ChaincodeId, ChaincodeInput, ChaincodeInvocationSpec, ChaincodeSpec, ChaincodeType};
pub use proposal::{Header, HeaderType, Proposal, SignedProposal};
pub use response::{ProposalResponse, ServerStatus, StatusCode};
pub use utils::assemble_signed_proposal;
