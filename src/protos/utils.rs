//! Proposal assembly: invocation + creator → proposal → signed proposal.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{keccak256, Bytes};
use rand::RngCore;

use crate::msp::IdentitySigner;
use crate::peer::types::{PeerError, PeerResult};
use crate::protos::chaincode::{ChaincodeInvocationSpec, ChaincodeSpec};
use crate::protos::proposal::{Header, HeaderType, Proposal, SignedProposal};

/// Size of the random nonce bound into every proposal header.
pub const NONCE_SIZE: usize = 24;

/// Fresh random nonce.
pub fn create_nonce() -> Bytes {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);
    Bytes::copy_from_slice(&nonce)
}

/// Transaction id: hex keccak-256 of `nonce || creator`.
pub fn compute_tx_id(nonce: &[u8], creator: &[u8]) -> String {
    let mut preimage = Vec::with_capacity(nonce.len() + creator.len());
    preimage.extend_from_slice(nonce);
    preimage.extend_from_slice(creator);
    alloy::hex::encode(keccak256(&preimage))
}

/// Build an unsigned proposal carrying `invocation` on behalf of `creator`.
pub fn create_proposal_from_cis(
    header_type: HeaderType,
    channel_id: &str,
    invocation: ChaincodeInvocationSpec,
    creator: Bytes,
) -> Proposal {
    let nonce = create_nonce();
    let tx_id = compute_tx_id(&nonce, &creator);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Proposal {
        header: Header {
            header_type,
            channel_id: channel_id.to_string(),
            tx_id,
            timestamp,
            epoch: 0,
            creator,
            nonce,
        },
        payload: invocation,
    }
}

/// Serialize `proposal` once and sign those exact bytes.
pub fn get_signed_proposal<S: IdentitySigner>(
    proposal: &Proposal,
    signer: &S,
) -> PeerResult<SignedProposal> {
    let proposal_bytes = proposal.to_bytes().map_err(PeerError::ProposalCreation)?;
    let signature = signer
        .sign(&proposal_bytes)
        .map_err(PeerError::ProposalSigning)?;
    Ok(SignedProposal {
        proposal_bytes,
        signature,
    })
}

/// Wrap `spec` into a config-type proposal for `signer` and sign it.
///
/// The channel id is empty: joining targets no existing channel context.
pub fn assemble_signed_proposal<S: IdentitySigner>(
    spec: ChaincodeSpec,
    signer: &S,
) -> PeerResult<SignedProposal> {
    let invocation = ChaincodeInvocationSpec::new(spec);

    let creator = signer
        .serialize_identity()
        .map_err(|source| PeerError::IdentitySerialization {
            identifier: signer.identifier(),
            source,
        })?;

    let proposal = create_proposal_from_cis(HeaderType::Config, "", invocation, creator);
    tracing::debug!(tx_id = %proposal.header.tx_id, "Proposal created");

    get_signed_proposal(&proposal, signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::msp::{IdentityError, LocalSigner, SerializedIdentity};
    use crate::protos::chaincode::{ChaincodeId, ChaincodeInput, ChaincodeType};

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_spec() -> ChaincodeSpec {
        ChaincodeSpec {
            chaincode_type: ChaincodeType::Golang,
            chaincode_id: ChaincodeId { name: "cscc".to_string() },
            input: ChaincodeInput {
                args: vec![
                    Bytes::from_static(b"JoinChain"),
                    Bytes::from_static(b"\x0a\x02genesis"),
                ],
            },
        }
    }

    /// Signer whose serialization or signing can be made to fail.
    struct FaultySigner {
        fail_serialize: bool,
    }

    impl IdentitySigner for FaultySigner {
        fn identifier(&self) -> String {
            "Org1MSP:faulty".to_string()
        }

        fn serialize_identity(&self) -> Result<Bytes, IdentityError> {
            if self.fail_serialize {
                Err(IdentityError::Unavailable("hsm offline".to_string()))
            } else {
                Ok(Bytes::from_static(b"creator"))
            }
        }

        fn sign(&self, _message: &[u8]) -> Result<Bytes, IdentityError> {
            Err(IdentityError::Unavailable("hsm offline".to_string()))
        }
    }

    #[test]
    fn test_assembled_proposal_fields() {
        let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
        let signed = assemble_signed_proposal(test_spec(), &signer).unwrap();
        let proposal = signed.proposal().unwrap();

        assert_eq!(proposal.header.header_type, HeaderType::Config);
        assert_eq!(proposal.header.channel_id, "");
        assert_eq!(proposal.header.creator, signer.serialize_identity().unwrap());
        assert_eq!(proposal.header.nonce.len(), NONCE_SIZE);
        assert_eq!(
            proposal.header.tx_id,
            compute_tx_id(&proposal.header.nonce, &proposal.header.creator)
        );
        assert_eq!(proposal.payload.chaincode_spec(), &test_spec());

        let creator = SerializedIdentity::from_bytes(&proposal.header.creator).unwrap();
        assert_eq!(creator.address().unwrap(), signer.address());
    }

    #[test]
    fn test_signature_verifies_over_exact_bytes() {
        let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
        let signed = assemble_signed_proposal(test_spec(), &signer).unwrap();
        assert!(signed.verify().is_ok());
    }

    #[test]
    fn test_any_mutated_byte_fails_verification() {
        let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
        let signed = assemble_signed_proposal(test_spec(), &signer).unwrap();

        for i in 0..signed.proposal_bytes.len() {
            let mut bytes = signed.proposal_bytes.to_vec();
            bytes[i] ^= 0x01;
            let tampered = SignedProposal {
                proposal_bytes: Bytes::from(bytes),
                signature: signed.signature.clone(),
            };
            assert!(tampered.verify().is_err(), "mutation at byte {} accepted", i);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_any_payload_signs_and_verifies(payload in proptest::collection::vec(any::<u8>(), 1..2048)) {
            let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
            let mut spec = test_spec();
            spec.input.args[1] = Bytes::from(payload.clone());

            let signed = assemble_signed_proposal(spec, &signer).unwrap();
            let proposal = signed.verify().unwrap();
            prop_assert_eq!(&proposal.payload.chaincode_spec().input.args[1][..], payload.as_slice());
        }
    }

    #[test]
    fn test_signature_from_other_key_rejected() {
        let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
        // Anvil's second account
        let other = LocalSigner::from_private_key(
            "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            "Org1MSP",
        )
        .unwrap();
        let signed = assemble_signed_proposal(test_spec(), &signer).unwrap();
        let forged = SignedProposal {
            signature: other.sign(&signed.proposal_bytes).unwrap(),
            ..signed
        };
        assert!(matches!(
            forged.verify(),
            Err(IdentityError::SignerMismatch { .. })
        ));
    }

    #[test]
    fn test_nonces_are_fresh() {
        let signer = LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap();
        let a = assemble_signed_proposal(test_spec(), &signer).unwrap();
        let b = assemble_signed_proposal(test_spec(), &signer).unwrap();
        assert_ne!(
            a.proposal().unwrap().header.tx_id,
            b.proposal().unwrap().header.tx_id
        );
    }

    #[test]
    fn test_identity_serialization_failure() {
        let signer = FaultySigner { fail_serialize: true };
        let err = assemble_signed_proposal(test_spec(), &signer).unwrap_err();
        assert!(matches!(err, PeerError::IdentitySerialization { .. }));
        assert!(err.to_string().contains("Org1MSP:faulty"));
    }

    #[test]
    fn test_signing_failure() {
        let signer = FaultySigner { fail_serialize: false };
        let err = assemble_signed_proposal(test_spec(), &signer).unwrap_err();
        assert!(matches!(err, PeerError::ProposalSigning(_)));
    }
}
