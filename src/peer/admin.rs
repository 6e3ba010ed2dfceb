//! Admin service stub.

use serde::Serialize;

use crate::comm::Connection;
use crate::peer::types::{PeerError, PeerResult};
use crate::protos::ServerStatus;

/// RPC method reporting the peer server status.
pub const GET_STATUS: &str = "protos.Admin/GetStatus";

#[derive(Debug, Serialize)]
struct Empty {}

/// Client for the Admin service.
#[derive(Debug, Clone)]
pub struct AdminClient {
    conn: Connection,
}

impl AdminClient {
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Query the peer server status.
    pub async fn get_status(&self) -> PeerResult<ServerStatus> {
        self.conn
            .invoke(GET_STATUS, &Empty {})
            .await
            .map_err(|source| PeerError::Transport {
                address: self.conn.address().to_string(),
                source,
            })
    }
}
