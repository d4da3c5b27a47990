//! Bus engine
//!
//! `PubSub` is the facade composing the subscription registry and the topic
//! queue. Producers hand it messages, subscribers hand it callbacks, and
//! `publish`/`publish_queued` drive the drain protocol:
//!
//! - the drain walks a snapshot of the queue taken at entry, so messages
//!   queued while a drain is in progress wait for the next publish
//! - for each message, every subscriber alive at that moment is invoked in
//!   registration order; synchronous unsubscribe decisions apply before the
//!   next subscriber is visited
//! - deferred decisions for a message are awaited together after its
//!   synchronous pass, so every synchronous subscriber sees the message
//!   before any asynchronous completion is waited on
//! - a delivered message is removed from the queue before the drain moves
//!   on; a failing callback therefore leaves exactly the undelivered
//!   remainder queued, and a later publish retries it
//!
//! Concurrency and usage notes:
//! - All mutating methods take `&mut self`, so overlapping drains on one
//!   instance cannot be expressed. Callers sharing a bus across tasks should
//!   hold it behind a lock (for example `Arc<Mutex<PubSub<_>>>`), which
//!   serializes publishes.
//! - There is no cancellation or timeout; a drain runs to completion or to
//!   the first callback failure.

use futures::future::join_all;
use tracing::{debug, warn};

use super::combine::Combinator;
use super::message::Topical;
use super::queue::TopicQueue;
use super::registry::{Callback, Outcome, Registry, SubscriptionId};
use crate::utils::error::{CallbackError, PublishError};

pub struct PubSub<M> {
    registry: Registry<M>,
    queue: TopicQueue<M>,
}

impl<M: Topical + Clone> Default for PubSub<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Topical + Clone> PubSub<M> {
    /// Bus without message combination: pushes are plain per-topic FIFO.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            queue: TopicQueue::new(),
        }
    }

    /// Bus that runs `combinator` over adjacent same-topic messages on every
    /// push.
    pub fn with_combinator(combinator: Combinator<M>) -> Self {
        Self {
            registry: Registry::new(),
            queue: TopicQueue::with_combinator(combinator),
        }
    }

    /// Register `callback` and return its subscription id.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&M) -> Result<Outcome, CallbackError> + Send + 'static,
    {
        self.registry.subscribe(Box::new(callback) as Callback<M>)
    }

    /// Remove a subscription; `false` if the id is unknown or already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.registry.is_subscribed(id)
    }

    /// Queue `message` without delivering it.
    pub fn add_to_queue(&mut self, message: M) {
        self.queue.push(message);
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue `message`, then drain. Equivalent to `add_to_queue` followed by
    /// [`publish_queued`](Self::publish_queued).
    pub async fn publish(&mut self, message: M) -> Result<(), PublishError> {
        self.add_to_queue(message);
        self.publish_queued().await
    }

    /// Deliver every currently queued message to every live subscriber.
    ///
    /// Messages are delivered sequentially in queue order (topics in
    /// creation order, FIFO within a topic). Returns once every message and
    /// every deferred callback decision has been processed; the first
    /// callback failure aborts the drain and propagates.
    pub async fn publish_queued(&mut self) -> Result<(), PublishError> {
        let batch = self.queue.snapshot();
        debug!(messages = batch.len(), "draining queue");
        for message in batch {
            self.deliver(&message).await?;
            let _ = self.queue.pop_front(message.topic());
        }
        Ok(())
    }

    /// Deliver one message to every subscriber alive at this point in the
    /// drain, then settle the deferred decisions it produced.
    async fn deliver(&mut self, message: &M) -> Result<(), PublishError> {
        let mut deferred: Vec<(SubscriptionId, _)> = Vec::new();

        // Snapshot the ids so removals below cannot skew the walk; ids
        // unsubscribed earlier in this drain are skipped by the lookup.
        for id in self.registry.ids() {
            let result = match self.registry.callback_mut(id) {
                Some(callback) => callback(message),
                None => continue,
            };
            match result {
                Ok(Outcome::Handled) => {}
                Ok(Outcome::Unsubscribe) => {
                    debug!(id, topic = message.topic(), "subscriber dropped itself");
                    self.registry.unsubscribe(id);
                }
                Ok(Outcome::Deferred(fut)) => deferred.push((id, fut)),
                Err(source) => {
                    warn!(id, topic = message.topic(), error = %source, "subscriber failed");
                    return Err(PublishError::Subscriber {
                        id,
                        topic: message.topic().to_string(),
                        source,
                    });
                }
            }
        }

        if deferred.is_empty() {
            return Ok(());
        }

        // Await the whole batch, then apply decisions in registration order.
        let (ids, futures): (Vec<_>, Vec<_>) = deferred.into_iter().unzip();
        let results = join_all(futures).await;
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(true) => {
                    debug!(id, topic = message.topic(), "subscriber dropped itself");
                    self.registry.unsubscribe(id);
                }
                Ok(false) => {}
                Err(source) => {
                    warn!(id, topic = message.topic(), error = %source, "deferred decision failed");
                    return Err(PublishError::Deferred {
                        id,
                        topic: message.topic().to_string(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}
