//! Responses returned by the peer services.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Endorser answer to a signed proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub status: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub payload: Bytes,
}

impl ProposalResponse {
    /// Status 200 is the endorser's OK; 0 is accepted as the default
    /// success status of older peers.
    pub fn is_success(&self) -> bool {
        matches!(self.status, 0 | 200)
    }
}

/// Peer server state reported by the Admin service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Undefined,
    Started,
    Stopped,
    Paused,
    Error,
    Unknown,
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusCode::Undefined => "UNDEFINED",
            StatusCode::Started => "STARTED",
            StatusCode::Stopped => "STOPPED",
            StatusCode::Paused => "PAUSED",
            StatusCode::Error => "ERROR",
            StatusCode::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: StatusCode,
}
