//! Connection factory shared by every peer-facing client.

use std::io;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::comm::connection::{Connection, Endpoint};
use crate::peer::types::{PeerError, PeerResult};

/// TLS settings for outgoing connections.
#[derive(Debug, Clone, Default)]
pub struct SecureOptions {
    /// Dial with TLS.
    pub use_tls: bool,
    /// PEM-encoded certificates trusted as roots for the server.
    pub server_root_cas: Vec<Vec<u8>>,
}

/// Transport settings for a [`ConnectionFactory`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for dialing and for each call.
    pub timeout: Duration,
    pub secure: SecureOptions,
}

/// Opens fresh, unpooled connections with fixed transport settings.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    timeout: Duration,
    use_tls: bool,
    roots: Vec<reqwest::Certificate>,
}

impl ConnectionFactory {
    /// Create a factory, parsing the configured root certificates up front.
    pub fn new(config: ClientConfig) -> PeerResult<Self> {
        let roots = config
            .secure
            .server_root_cas
            .iter()
            .map(|pem| {
                reqwest::Certificate::from_pem(pem).map_err(|e| {
                    PeerError::Configuration(format!("invalid root certificate: {}", e))
                })
            })
            .collect::<PeerResult<Vec<_>>>()?;

        Ok(Self {
            timeout: config.timeout,
            use_tls: config.secure.use_tls,
            roots,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    /// Dial `address` and return a connection ready for one call.
    ///
    /// When `server_name` is non-empty it is used as the TLS server name
    /// while the TCP connection still goes to `address`.
    pub async fn new_connection(&self, address: &str, server_name: &str) -> PeerResult<Connection> {
        let connection_error = |source: io::Error| PeerError::Connection {
            address: address.to_string(),
            source,
        };

        let endpoint = Endpoint::parse(address).map_err(connection_error)?;

        // Dial eagerly so an unreachable peer surfaces here, not mid-call.
        let dial = TcpStream::connect((endpoint.host.as_str(), endpoint.port));
        let stream = match timeout(self.timeout, dial).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(connection_error(e)),
            Err(_) => {
                return Err(connection_error(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no connection after {} ms", self.timeout.as_millis()),
                )))
            }
        };
        let peer_addr = stream.peer_addr().map_err(connection_error)?;
        drop(stream);

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .no_proxy();

        let host = if server_name.is_empty() {
            endpoint.host.clone()
        } else {
            builder = builder.resolve(server_name, peer_addr);
            server_name.to_string()
        };

        for root in &self.roots {
            builder = builder.add_root_certificate(root.clone());
        }

        let http = builder
            .build()
            .map_err(|e| connection_error(io::Error::other(e)))?;

        let scheme = if self.use_tls { "https" } else { "http" };
        let base_url = format!("{}://{}/", scheme, Endpoint::authority(&host, endpoint.port));

        Ok(Connection::new(address, base_url, self.timeout, http))
    }
}
