//! Joining a peer to a channel.
//!
//! # Responsibilities
//! - Read the genesis block and build the `cscc` JoinChain invocation
//! - Assemble and sign the proposal with the local identity
//! - Submit it once to the peer's Endorser and classify the answer

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;

use crate::msp::IdentitySigner;
use crate::peer::{validate_response, PeerClient, PeerError, PeerResult};
use crate::protos::{
    assemble_signed_proposal, ChaincodeId, ChaincodeInput, ChaincodeSpec, ChaincodeType,
    ProposalResponse,
};

/// Configuration system chaincode handling channel lifecycle operations.
pub const CSCC: &str = "cscc";

/// Operation marker for joining a channel.
pub const JOIN_CHAIN: &str = "JoinChain";

/// Printed once the peer accepted the join proposal.
pub const JOIN_SUCCESS_MESSAGE: &str = "Successfully submitted proposal to join channel";

const MISSING_BLOCK_PATH: &str = "Must supply genesis block path";

/// Build the JoinChain spec from the genesis block at `path`.
///
/// The file is read once and passed through unmodified.
pub fn build_join_spec(path: &Path) -> PeerResult<ChaincodeSpec> {
    if path.as_os_str().is_empty() {
        return Err(PeerError::Configuration(MISSING_BLOCK_PATH.to_string()));
    }

    let block = fs::read(path).map_err(|source| PeerError::GenesisBlockNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if block.is_empty() {
        return Err(PeerError::Configuration(format!(
            "genesis block file {} is empty",
            path.display()
        )));
    }

    Ok(ChaincodeSpec {
        chaincode_type: ChaincodeType::Golang,
        chaincode_id: ChaincodeId {
            name: CSCC.to_string(),
        },
        input: ChaincodeInput {
            args: vec![Bytes::from_static(JOIN_CHAIN.as_bytes()), Bytes::from(block)],
        },
    })
}

/// Inputs of a join attempt.
#[derive(Debug, Clone, Default)]
pub struct JoinConfig {
    /// Path to the genesis block of the channel to join.
    pub genesis_block_path: Option<PathBuf>,
}

/// Stages of a single join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Idle,
    SpecBuilt,
    ProposalAssembled,
    Sent,
    Classified,
}

impl fmt::Display for JoinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinState::Idle => "idle",
            JoinState::SpecBuilt => "spec_built",
            JoinState::ProposalAssembled => "proposal_assembled",
            JoinState::Sent => "sent",
            JoinState::Classified => "classified",
        };
        f.write_str(name)
    }
}

/// One attempt at joining the peer to a channel.
#[derive(Debug, Clone)]
pub struct JoinOperation {
    config: JoinConfig,
}

impl JoinOperation {
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    /// The configured genesis block path, or a configuration error.
    pub fn block_path(&self) -> PeerResult<&Path> {
        match self.config.genesis_block_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(PeerError::Configuration(MISSING_BLOCK_PATH.to_string())),
        }
    }

    /// Run the attempt: build, sign, send once, classify.
    ///
    /// Fails before touching the file system or the network when no block
    /// path is configured. Nothing is retried.
    pub async fn execute<S: IdentitySigner>(
        &self,
        signer: &S,
        peer: &PeerClient,
    ) -> PeerResult<ProposalResponse> {
        let path = self.block_path()?;
        tracing::debug!(state = %JoinState::Idle, path = %path.display(), "Joining channel");

        let spec = build_join_spec(path)?;
        tracing::debug!(state = %JoinState::SpecBuilt, "Join spec built");

        let signed = assemble_signed_proposal(spec, signer)?;
        tracing::debug!(
            state = %JoinState::ProposalAssembled,
            proposal_bytes = signed.proposal_bytes.len(),
            "Join proposal signed"
        );

        let endorser = peer.endorser().await?;
        let result = endorser.process_proposal(&signed).await;
        tracing::debug!(state = %JoinState::Sent, address = %peer.address(), "Join proposal sent");

        let outcome = validate_response(result, peer.address());
        tracing::debug!(
            state = %JoinState::Classified,
            success = outcome.is_ok(),
            "Join response classified"
        );
        outcome
    }
}
