//! The `error` module defines the error types used within the `coalsub`
//! library.
//!
//! This module centralizes error handling, providing a consistent way to
//! represent and propagate callback failures out of a drain.
//!
//! Unknown subscription ids are not errors anywhere in the API; those paths
//! report `false` instead.

use thiserror::Error;

use crate::broker::registry::SubscriptionId;

/// Error surfaced by a subscriber callback, opaque to the core.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a `publish` drain. Either form aborts delivery of the
/// remaining queued messages; the queue keeps the undelivered remainder so
/// a retrying publish redelivers it.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A callback failed synchronously while handling a message.
    #[error("subscriber {id} failed on topic '{topic}': {source}")]
    Subscriber {
        id: SubscriptionId,
        topic: String,
        source: CallbackError,
    },
    /// A callback's deferred decision resolved to a failure.
    #[error("deferred decision of subscriber {id} failed on topic '{topic}': {source}")]
    Deferred {
        id: SubscriptionId,
        topic: String,
        source: CallbackError,
    },
}
