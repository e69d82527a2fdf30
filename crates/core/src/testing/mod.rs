//! Testing utilities and a mock gateway for end-to-end tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use leadfinder_core::testing::{fixtures, MockGateway};
//!
//! let gateway = MockGateway::new();
//! gateway
//!     .set_batch(fixtures::batch(vec![fixtures::lead("alice", 10)], &["https://a"]))
//!     .await;
//!
//! // Use in AppState or hand to run_search...
//! ```

mod mock_gateway;

pub use mock_gateway::{MockGateway, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::gateway::LeadBatch;

    /// Raw lead object with a username and upvote count, as the service sends it.
    pub fn lead(username: &str, upvotes: i64) -> Value {
        json!({
            "Username": username,
            "Upvotes": upvotes,
        })
    }

    /// Raw lead object with every field the service can fill in.
    pub fn full_lead(username: &str, upvotes: i64, confidence: &str, score: i64) -> Value {
        json!({
            "Username": username,
            "Post Type": "post",
            "Source": "reddit",
            "Title": format!("Looking for help from {}", username),
            "Snippet": format!("{} needs a lead finder", username),
            "Links": format!("https://reddit.com/u/{0}, https://{0}.example.com", username),
            "Upvotes": upvotes,
            "Timestamp": "2024-03-15T10:30:00",
            "Confidence": confidence,
            "Confidence Score": score,
        })
    }

    /// Batch from raw leads and source URLs.
    pub fn batch(leads: Vec<Value>, sources: &[&str]) -> LeadBatch {
        LeadBatch::new(leads, sources.iter().map(|s| s.to_string()).collect())
    }
}
