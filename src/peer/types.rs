//! Peer-facing error definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::comm::RpcError;
use crate::msp::IdentityError;

/// Errors that can occur while building, sending or classifying a proposal.
#[derive(Debug, Error)]
pub enum PeerError {
    /// A required option or setting is missing or unusable.
    #[error("{0}")]
    Configuration(String),

    /// The genesis block file could not be read.
    #[error("genesis block file not found {}: {source}", .path.display())]
    GenesisBlockNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The signer could not serialize its identity.
    #[error("Error serializing identity for {identifier}: {source}")]
    IdentitySerialization {
        identifier: String,
        #[source]
        source: IdentityError,
    },

    /// The proposal could not be encoded.
    #[error("Error creating proposal for join: {0}")]
    ProposalCreation(#[source] serde_json::Error),

    /// The signer refused to sign the proposal.
    #[error("Error creating signed proposal: {0}")]
    ProposalSigning(#[source] IdentityError),

    /// No connection could be opened to the peer.
    #[error("failed to connect to {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The RPC itself failed (network, timeout, transport-level rejection).
    #[error("rpc to {address} failed: {source}")]
    Transport {
        address: String,
        #[source]
        source: RpcError,
    },

    /// The call succeeded but carried no response object.
    #[error("proposal failed (err: nil proposal response)")]
    EmptyResponse,

    /// The endorser answered with a non-success status.
    #[error("proposal failed (err: bad proposal response {status})")]
    Rejected { status: i32 },
}

impl PeerError {
    /// Stable label for the error kind (metrics, diagnostics).
    pub fn kind(&self) -> &'static str {
        match self {
            PeerError::Configuration(_) => "configuration",
            PeerError::GenesisBlockNotFound { .. } => "genesis_block_not_found",
            PeerError::IdentitySerialization { .. } => "identity_serialization",
            PeerError::ProposalCreation(_) => "proposal_creation",
            PeerError::ProposalSigning(_) => "proposal_signing",
            PeerError::Connection { .. } => "connection",
            PeerError::Transport { .. } => "transport",
            PeerError::EmptyResponse => "empty_response",
            PeerError::Rejected { .. } => "rejected",
        }
    }
}

/// Result type for peer operations.
pub type PeerResult<T> = Result<T, PeerError>;
