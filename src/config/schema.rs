//! Configuration schema definitions.
//!
//! This module defines the configuration structure consumed by the peer CLI.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the peer CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    /// Target peer settings (address, TLS, identity).
    pub peer: PeerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Connection settings for the target peer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Peer endpoint as `host:port` (e.g., "peer0.org1.example.com:7051").
    pub address: String,

    /// MSP identifier of the local signing identity.
    pub local_msp_id: String,

    /// Requested client timeout in milliseconds.
    ///
    /// Peer clients always run with [`crate::comm::PEER_CLIENT_TIMEOUT`];
    /// this value is accepted for compatibility and otherwise ignored.
    pub client_timeout_ms: u64,

    /// TLS settings for the peer connection.
    pub tls: TlsConfig,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:7051".to_string(),
            local_msp_id: "SampleOrg".to_string(),
            client_timeout_ms: 3000,
            tls: TlsConfig::default(),
        }
    }
}

/// TLS configuration for the peer connection.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TlsConfig {
    /// Connect over TLS.
    pub enabled: bool,

    /// PEM file holding the CA certificate(s) trusted for the peer.
    pub root_cert_file: Option<PathBuf>,

    /// Server name expected in the peer certificate, when it differs from
    /// the host part of the address.
    pub server_host_override: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g., "info" or "peer_cli=debug,reqwest=warn").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
