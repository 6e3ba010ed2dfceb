//! Shared utilities for integration testing.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

use peer_cli::config::PeerConfig;
use peer_cli::msp::LocalSigner;
use peer_cli::protos::{ProposalResponse, ServerStatus, SignedProposal};

// Well-known test private key (Anvil's first account)
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// How the mock endorser answers `ProcessProposal`.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// A response object with this status.
    Status(i32),
    /// A JSON `null` body.
    Null,
    /// A bare HTTP status with no body.
    Http(u16),
    /// Answer 200 after sleeping.
    Delay(Duration),
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    calls: Arc<AtomicU32>,
    received: Arc<Mutex<Vec<SignedProposal>>>,
    status: ServerStatus,
}

/// A running mock peer.
#[allow(dead_code)]
pub struct MockPeer {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    received: Arc<Mutex<Vec<SignedProposal>>>,
}

#[allow(dead_code)]
impl MockPeer {
    /// Number of RPCs served so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<SignedProposal> {
        self.received.lock().unwrap().clone()
    }

    pub fn peer_config(&self) -> PeerConfig {
        PeerConfig {
            address: self.addr.to_string(),
            ..PeerConfig::default()
        }
    }
}

async fn process_proposal(
    State(state): State<MockState>,
    Json(proposal): Json<SignedProposal>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.received.lock().unwrap().push(proposal);

    match state.reply {
        Reply::Status(status) => Json(ProposalResponse {
            status,
            message: format!("status {}", status),
            payload: Default::default(),
        })
        .into_response(),
        Reply::Null => Json(serde_json::Value::Null).into_response(),
        Reply::Http(code) => StatusCode::from_u16(code).unwrap().into_response(),
        Reply::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(ProposalResponse {
                status: 200,
                message: String::new(),
                payload: Default::default(),
            })
            .into_response()
        }
    }
}

async fn get_status(State(state): State<MockState>) -> Json<ServerStatus> {
    state.calls.fetch_add(1, Ordering::SeqCst);
    Json(state.status)
}

/// Start a mock peer serving the Endorser and Admin services.
pub async fn start_mock_peer(reply: Reply, status: ServerStatus) -> MockPeer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let calls = Arc::new(AtomicU32::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        reply,
        calls: calls.clone(),
        received: received.clone(),
        status,
    };

    let app = Router::new()
        .route("/protos.Endorser/ProcessProposal", post(process_proposal))
        .route("/protos.Admin/GetStatus", post(get_status))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockPeer {
        addr,
        calls,
        received,
    }
}

/// Start a listener that accepts connections and drops them immediately.
#[allow(dead_code)]
pub async fn start_dropping_listener() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    addr
}

/// Write `bytes` to a fresh temporary genesis block file.
#[allow(dead_code)]
pub fn genesis_block(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[allow(dead_code)]
pub fn signer() -> LocalSigner {
    LocalSigner::from_private_key(TEST_PRIVATE_KEY, "Org1MSP").unwrap()
}

