//! Command handlers behind the `peer` binary.
//!
//! Each handler writes its user-facing output to the given writer and
//! returns a typed error; rendering and exit codes are left to `main`.

use std::io::Write;

use thiserror::Error;

use crate::channel::{JoinConfig, JoinOperation, JOIN_SUCCESS_MESSAGE};
use crate::config::{ConfigError, CoreConfig};
use crate::msp::{IdentityError, IdentitySigner, LocalSigner};
use crate::observability::metrics;
use crate::peer::{get_admin_client, PeerClient, PeerError};

/// Errors surfaced at the command boundary.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Peer(#[from] PeerError),

    #[error("Cannot load signing identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("Fatal error when initializing core config: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// `peer channel join`: load the local identity and submit the join.
pub async fn channel_join<W: Write>(
    config: &CoreConfig,
    join: JoinConfig,
    out: &mut W,
) -> Result<(), CommandError> {
    let op = JoinOperation::new(join);
    // Checked first so a missing path never needs key material or a peer.
    op.block_path()?;

    let signer = LocalSigner::from_env(config.peer.local_msp_id.clone())?;
    let peer = PeerClient::new(&config.peer)?;
    join_channel(&op, &signer, &peer, out).await
}

/// Run `op` and report the outcome on `out`.
pub async fn join_channel<S, W>(
    op: &JoinOperation,
    signer: &S,
    peer: &PeerClient,
    out: &mut W,
) -> Result<(), CommandError>
where
    S: IdentitySigner,
    W: Write,
{
    match op.execute(signer, peer).await {
        Ok(response) => {
            metrics::record_proposal(metrics::OUTCOME_SUCCESS);
            tracing::debug!(status = response.status, "Join proposal accepted");
            writeln!(out, "{}", JOIN_SUCCESS_MESSAGE)?;
            Ok(())
        }
        Err(e) => {
            metrics::record_proposal(e.kind());
            tracing::debug!(kind = e.kind(), error = %e, "Join proposal failed");
            Err(e.into())
        }
    }
}

/// `peer node status`: query the Admin service.
pub async fn node_status<W: Write>(config: &CoreConfig, out: &mut W) -> Result<(), CommandError> {
    let result = match get_admin_client(&config.peer).await {
        Ok(admin) => admin.get_status().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(status) => {
            metrics::record_admin_request("get_status", metrics::OUTCOME_SUCCESS);
            writeln!(out, "status:{}", status.status)?;
            Ok(())
        }
        Err(e) => {
            metrics::record_admin_request("get_status", e.kind());
            Err(e.into())
        }
    }
}

/// `peer version`.
pub fn version<W: Write>(out: &mut W) -> Result<(), CommandError> {
    writeln!(out, "peer:")?;
    writeln!(out, " Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, " OS/Arch: {}/{}", std::env::consts::OS, std::env::consts::ARCH)?;
    Ok(())
}
