//! Proposal envelopes and their signed form.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

use crate::msp::{verify_signature, IdentityError, SerializedIdentity};
use crate::protos::chaincode::ChaincodeInvocationSpec;

/// Kind of transaction a proposal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderType {
    Message,
    Config,
    ConfigUpdate,
    EndorserTransaction,
}

/// Proposal header: channel context plus the creator binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub header_type: HeaderType,
    /// Empty for operations that create or join a channel.
    pub channel_id: String,
    pub tx_id: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub epoch: u64,
    /// Serialized identity of the signer.
    pub creator: Bytes,
    pub nonce: Bytes,
}

/// An unsigned request for endorsement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub header: Header,
    pub payload: ChaincodeInvocationSpec,
}

impl Proposal {
    /// Serialize the proposal into the bytes that get signed.
    pub fn to_bytes(&self) -> Result<Bytes, serde_json::Error> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

/// A proposal together with a signature over its exact bytes.
///
/// `proposal_bytes` is kept as produced at signing time and never
/// re-serialized, so the signature stays valid on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProposal {
    pub proposal_bytes: Bytes,
    pub signature: Bytes,
}

impl SignedProposal {
    /// Decode the signed proposal bytes.
    pub fn proposal(&self) -> Result<Proposal, serde_json::Error> {
        serde_json::from_slice(&self.proposal_bytes)
    }

    /// Check the signature against the creator named inside the proposal.
    ///
    /// Returns the decoded proposal on success.
    pub fn verify(&self) -> Result<Proposal, IdentityError> {
        let proposal = self.proposal()?;
        let creator = SerializedIdentity::from_bytes(&proposal.header.creator)?;
        verify_signature(&creator, &self.proposal_bytes, &self.signature)?;
        Ok(proposal)
    }
}
