//! Peer client: produces Endorser and Admin stubs for one peer.
//!
//! # Responsibilities
//! - Turn a resolved [`PeerConfig`] into transport settings
//! - Enforce [`PEER_CLIENT_TIMEOUT`] on every connection
//! - Open a fresh connection per stub

use std::fs;

use crate::comm::{ClientConfig, ConnectionFactory, SecureOptions, PEER_CLIENT_TIMEOUT};
use crate::config::PeerConfig;
use crate::peer::admin::AdminClient;
use crate::peer::endorser::EndorserClient;
use crate::peer::types::{PeerError, PeerResult};

/// Client for communicating with a peer.
#[derive(Debug, Clone)]
pub struct PeerClient {
    connections: ConnectionFactory,
    address: String,
    server_host_override: String,
}

impl PeerClient {
    /// Create a peer client from configuration.
    ///
    /// No network activity happens here; connections are opened by the
    /// stub accessors.
    pub fn new(config: &PeerConfig) -> PeerResult<Self> {
        let address = config.address.trim();
        if address.is_empty() {
            return Err(PeerError::Configuration(
                "failed to load config for PeerClient: peer address is not set".to_string(),
            ));
        }

        let mut server_root_cas = Vec::new();
        if config.tls.enabled {
            if let Some(path) = &config.tls.root_cert_file {
                let pem = fs::read(path).map_err(|e| {
                    PeerError::Configuration(format!(
                        "failed to load config for PeerClient: unable to read root certificate {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                server_root_cas.push(pem);
            }
        }

        if config.client_timeout_ms != PEER_CLIENT_TIMEOUT.as_millis() as u64 {
            tracing::debug!(
                configured_ms = config.client_timeout_ms,
                enforced_ms = PEER_CLIENT_TIMEOUT.as_millis() as u64,
                "Overriding configured peer client timeout"
            );
        }

        let connections = ConnectionFactory::new(ClientConfig {
            timeout: PEER_CLIENT_TIMEOUT,
            secure: SecureOptions {
                use_tls: config.tls.enabled,
                server_root_cas,
            },
        })?;

        Ok(Self {
            connections,
            address: address.to_string(),
            server_host_override: config.tls.server_host_override.clone(),
        })
    }

    /// Open a connection and return an Endorser stub bound to it.
    pub async fn endorser(&self) -> PeerResult<EndorserClient> {
        let conn = self
            .connections
            .new_connection(&self.address, &self.server_host_override)
            .await?;
        Ok(EndorserClient::new(conn))
    }

    /// Open a connection and return an Admin stub bound to it.
    pub async fn admin(&self) -> PeerResult<AdminClient> {
        let conn = self
            .connections
            .new_connection(&self.address, &self.server_host_override)
            .await?;
        Ok(AdminClient::new(conn))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn server_host_override(&self) -> &str {
        &self.server_host_override
    }

    pub fn connections(&self) -> &ConnectionFactory {
        &self.connections
    }
}

/// Endorser stub for the peer named in `config`.
pub async fn get_endorser_client(config: &PeerConfig) -> PeerResult<EndorserClient> {
    PeerClient::new(config)?.endorser().await
}

/// Admin stub for the peer named in `config`.
pub async fn get_admin_client(config: &PeerConfig) -> PeerResult<AdminClient> {
    PeerClient::new(config)?.admin().await
}
