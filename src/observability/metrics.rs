//! Metrics collection.
//!
//! # Metrics
//! - `peer_proposals_total` (counter): submitted proposals by outcome
//! - `peer_admin_requests_total` (counter): admin calls by outcome
//!
//! No exporter is installed here; the calls are no-ops unless the
//! embedding process installs a `metrics` recorder.

/// Outcome label for successful calls.
pub const OUTCOME_SUCCESS: &str = "success";

/// Record the outcome of a proposal submission.
pub fn record_proposal(outcome: &'static str) {
    metrics::counter!("peer_proposals_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of an admin request.
pub fn record_admin_request(method: &'static str, outcome: &'static str) {
    metrics::counter!("peer_admin_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
}
