//! Signing identities.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::primitives::{Address, Bytes};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::msp::types::{IdentityError, SerializedIdentity};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CORE_PEER_PRIVATE_KEY";

/// Something able to present a caller identity and sign on its behalf.
pub trait IdentitySigner {
    /// Human-readable identifier used in diagnostics.
    fn identifier(&self) -> String;

    /// Serialized identity, embedded as the proposal creator.
    fn serialize_identity(&self) -> Result<Bytes, IdentityError>;

    /// Sign `message` exactly as given.
    fn sign(&self, message: &[u8]) -> Result<Bytes, IdentityError>;
}

/// Signing identity backed by a local secp256k1 key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// MSP the identity is enrolled with.
    msp_id: String,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `msp_id` - MSP identifier of the identity
    pub fn from_private_key(
        private_key_hex: &str,
        msp_id: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| IdentityError::InvalidKey(format!("{}", e)))?;
        let msp_id = msp_id.into();

        tracing::debug!(
            address = %signer.address(),
            msp_id = %msp_id,
            "Signing identity loaded"
        );

        Ok(Self { signer, msp_id })
    }

    /// Load the signer from the environment.
    ///
    /// Reads `CORE_PEER_PRIVATE_KEY`.
    pub fn from_env(msp_id: impl Into<String>) -> Result<Self, IdentityError> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
            .map_err(|_| IdentityError::MissingKey(PRIVATE_KEY_ENV_VAR))?;

        Self::from_private_key(&private_key, msp_id)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }
}

impl IdentitySigner for LocalSigner {
    fn identifier(&self) -> String {
        format!("{}:{}", self.msp_id, self.signer.address())
    }

    fn serialize_identity(&self) -> Result<Bytes, IdentityError> {
        SerializedIdentity::new(self.msp_id.clone(), self.signer.address()).to_bytes()
    }

    /// Produces a 65-byte EIP-191 personal-message signature.
    fn sign(&self, message: &[u8]) -> Result<Bytes, IdentityError> {
        let signature = self.signer.sign_message_sync(message)?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}
