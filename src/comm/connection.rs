//! Per-call peer connections.
//!
//! # Responsibilities
//! - Parse peer addresses into dialable endpoints
//! - Generate unique connection IDs for tracing
//! - Issue a single JSON RPC over an established connection

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::{Host, Url};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Global atomic counter for connection IDs.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Failure of a single RPC after the connection was established.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Network failure, timeout or non-2xx status.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The reply body was not the expected JSON message.
    #[error("error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RpcError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RpcError::Http(e) if e.is_timeout())
    }
}

/// Host and port split out of a peer address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Parse `host:port`, optionally prefixed with a scheme.
    pub fn parse(address: &str) -> io::Result<Self> {
        let invalid = |reason: String| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid address '{}': {}", address, reason),
            )
        };

        let with_scheme = if address.contains("://") {
            address.to_string()
        } else {
            format!("tcp://{}", address)
        };
        let url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;

        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            None => return Err(invalid("missing host".to_string())),
        };
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port".to_string()))?;

        Ok(Self { host, port })
    }

    /// `host:port` form usable in a URL authority.
    pub fn authority(host: &str, port: u16) -> String {
        if host.contains(':') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        }
    }
}

/// An established connection to one peer.
///
/// Owned by the stub it was opened for; not shared across calls.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    address: String,
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl Connection {
    pub(crate) fn new(address: &str, base_url: String, timeout: Duration, http: reqwest::Client) -> Self {
        let id = ConnectionId::new();
        tracing::debug!(connection_id = %id, address = %address, base_url = %base_url, "Connection established");
        Self {
            id,
            address: address.to_string(),
            base_url,
            timeout,
            http,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Address the connection was dialed with.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Deadline applied to every call on this connection.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke `method` (e.g. `protos.Endorser/ProcessProposal`) with a JSON
    /// request body and decode the JSON reply.
    ///
    /// Non-2xx HTTP statuses are returned as errors.
    pub async fn invoke<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = self.invoke_raw(method, request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Invoke `method` and return the undecoded reply body.
    pub async fn invoke_raw<Req>(&self, method: &str, request: &Req) -> Result<Vec<u8>, RpcError>
    where
        Req: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            connection_id = %self.id,
            method = %method,
            request_id = %request_id,
            "Invoking peer RPC"
        );

        let response = self
            .http
            .post(format!("{}{}", self.base_url, method))
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        tracing::debug!(
            connection_id = %self.id,
            request_id = %request_id,
            body_len = body.len(),
            "Peer RPC answered"
        );
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("conn-"));
    }

    #[test]
    fn rpc_decode_error_is_not_timeout() {
        let err = RpcError::from(serde_json::from_slice::<u32>(b"{").unwrap_err());
        assert!(!err.is_timeout());
        assert!(err.to_string().starts_with("error decoding response body"));
    }

    #[test]
    fn endpoint_parse_host_port() {
        let endpoint = Endpoint::parse("peer0.org1.example.com:7051").unwrap();
        assert_eq!(endpoint.host, "peer0.org1.example.com");
        assert_eq!(endpoint.port, 7051);
    }

    #[test]
    fn endpoint_parse_ipv6() {
        let endpoint = Endpoint::parse("[::1]:7051").unwrap();
        assert_eq!(endpoint.host, "::1");
        assert_eq!(Endpoint::authority(&endpoint.host, endpoint.port), "[::1]:7051");
    }

    #[test]
    fn endpoint_parse_with_scheme_default_port() {
        let endpoint = Endpoint::parse("https://peer0.example.com").unwrap();
        assert_eq!(endpoint.port, 443);
    }

    #[test]
    fn endpoint_requires_port() {
        let err = Endpoint::parse("peer0.example.com").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("peer0.example.com"));
    }
}
