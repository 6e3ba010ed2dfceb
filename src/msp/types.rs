//! Identity types and error definitions.

use alloy::primitives::{Address, Bytes, Signature, SignatureError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ADDRESS_LEN: usize = 20;

/// Errors raised by identity serialization, signing and verification.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Invalid private key format or derivation error.
    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    /// Required key material is not configured.
    #[error("Environment variable {0} not set")]
    MissingKey(&'static str),

    /// The signing backend could not be used.
    #[error("Identity unavailable: {0}")]
    Unavailable(String),

    /// Identity or message (de)serialization failed.
    #[error("Identity encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The underlying signer refused to sign.
    #[error("Signing failed: {0}")]
    Signing(#[from] alloy::signers::Error),

    /// Serialized identity does not carry a 20-byte account id.
    #[error("Malformed identity: expected 20 id bytes, got {0}")]
    MalformedIdentity(usize),

    /// Signature bytes could not be parsed or recovered.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Signature was produced by a different key than the creator.
    #[error("Signature was produced by {recovered}, expected {expected}")]
    SignerMismatch { expected: Address, recovered: Address },
}

/// Wire form of a caller identity, embedded as `creator` in proposals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIdentity {
    /// Membership service provider the identity belongs to.
    pub msp_id: String,
    /// Account address derived from the signing key.
    pub id_bytes: Bytes,
}

impl SerializedIdentity {
    pub fn new(msp_id: impl Into<String>, address: Address) -> Self {
        Self {
            msp_id: msp_id.into(),
            id_bytes: Bytes::copy_from_slice(address.as_slice()),
        }
    }

    pub fn to_bytes(&self) -> Result<Bytes, IdentityError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Account address carried by this identity.
    pub fn address(&self) -> Result<Address, IdentityError> {
        if self.id_bytes.len() != ADDRESS_LEN {
            return Err(IdentityError::MalformedIdentity(self.id_bytes.len()));
        }
        Ok(Address::from_slice(&self.id_bytes))
    }
}

/// Check that `signature` over `message` was produced by `identity`.
pub fn verify_signature(
    identity: &SerializedIdentity,
    message: &[u8],
    signature: &[u8],
) -> Result<(), IdentityError> {
    let expected = identity.address()?;
    let signature = Signature::try_from(signature)?;
    let recovered = signature.recover_address_from_msg(message)?;
    if recovered != expected {
        return Err(IdentityError::SignerMismatch { expected, recovered });
    }
    Ok(())
}
