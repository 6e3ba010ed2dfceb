//! Endorser service stub and response classification.

use crate::comm::{Connection, RpcError};
use crate::peer::types::{PeerError, PeerResult};
use crate::protos::{ProposalResponse, SignedProposal};

/// RPC method used to submit a signed proposal.
pub const PROCESS_PROPOSAL: &str = "protos.Endorser/ProcessProposal";

/// Client for the Endorser service.
#[derive(Debug, Clone)]
pub struct EndorserClient {
    conn: Connection,
}

impl EndorserClient {
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Submit `proposal`. Bounded by the connection timeout.
    ///
    /// `Ok(None)` means the peer answered without a response object: an
    /// empty body or a JSON `null`.
    pub async fn process_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<Option<ProposalResponse>, RpcError> {
        let body = self.conn.invoke_raw(PROCESS_PROPOSAL, proposal).await?;
        decode_response(&body)
    }
}

fn decode_response(body: &[u8]) -> Result<Option<ProposalResponse>, RpcError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Classify the outcome of a `ProcessProposal` call made against `address`.
pub fn validate_response(
    result: Result<Option<ProposalResponse>, RpcError>,
    address: &str,
) -> PeerResult<ProposalResponse> {
    let response = result.map_err(|source| PeerError::Transport {
        address: address.to_string(),
        source,
    })?;

    match response {
        None => Err(PeerError::EmptyResponse),
        Some(response) if response.is_success() => Ok(response),
        Some(response) => Err(PeerError::Rejected {
            status: response.status,
        }),
    }
}
