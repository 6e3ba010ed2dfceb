//! Chaincode invocation descriptors.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Language runtime of the target chaincode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChaincodeType {
    Undefined,
    Golang,
    Node,
    Car,
    Java,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeId {
    pub name: String,
}

/// Ordered invocation arguments; the first one selects the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInput {
    pub args: Vec<Bytes>,
}

/// Which chaincode to call and with what input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeSpec {
    #[serde(rename = "type")]
    pub chaincode_type: ChaincodeType,
    pub chaincode_id: ChaincodeId,
    pub input: ChaincodeInput,
}

/// A [`ChaincodeSpec`] ready to be carried by a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInvocationSpec {
    chaincode_spec: ChaincodeSpec,
}

impl ChaincodeInvocationSpec {
    pub fn new(chaincode_spec: ChaincodeSpec) -> Self {
        Self { chaincode_spec }
    }

    pub fn chaincode_spec(&self) -> &ChaincodeSpec {
        &self.chaincode_spec
    }
}
