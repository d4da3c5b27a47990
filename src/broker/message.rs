//! Message definitions for the bus
//!
//! The queue and dispatcher are generic over any type carrying a topic, so
//! the only hard requirement on a message is the [`Topical`] trait. `Message`
//! is the canonical concrete representation for callers that do not need
//! their own type.
//!
//! Notes on fields:
//! - `topic`: topic name used for grouping and combination; messages on
//!   different topics never combine
//! - `payload`: opaque JSON body; the core never inspects it
//! - `timestamp`: milliseconds since UNIX epoch, set at construction

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability required of every message type: expose the topic it belongs to.
///
/// The topic is used purely as a grouping key for queueing and combination;
/// it is never stored as a first-class entity.
pub trait Topical {
    fn topic(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub payload: Value,
    pub timestamp: i64,
}

impl Message {
    /// Create a message on `topic` carrying `payload`, stamped with the
    /// current time.
    pub fn new(topic: &str, payload: Value) -> Self {
        Self {
            topic: topic.to_string(),
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Topical for Message {
    fn topic(&self) -> &str {
        &self.topic
    }
}
