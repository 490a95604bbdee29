//! Conversation history domain type.
//!
//! One `Exchange` records a completed question/answer pair. The history
//! store keeps an ordered sequence of these in a single JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed question/answer exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// Unique exchange ID.
    pub id: String,

    /// The caller's query, as received (trimmed).
    pub query: String,

    /// The final normalized answer.
    pub answer: String,

    /// When the exchange completed.
    pub asked_at: DateTime<Utc>,
}

impl Exchange {
    /// Create a new exchange stamped with the current time.
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query: query.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}
