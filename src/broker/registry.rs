//! Subscription registry
//!
//! The registry owns the table from subscription id to callback. Ids come
//! from a monotonically increasing counter starting at 1 and are never
//! reused, so a `BTreeMap` keyed by id iterates subscribers in registration
//! order. That order is externally observable through callback sequencing,
//! so the map choice is load-bearing, not cosmetic.
//!
//! Concurrency note: the registry is plain owned state; the dispatcher
//! mutates it on a single logical thread of control and no lock is needed.

use std::collections::BTreeMap;

use futures::future::BoxFuture;

use crate::utils::error::CallbackError;

pub type SubscriptionId = u64;

/// What a callback reports back about a delivery.
///
/// A callback either finishes synchronously (keeping or dropping its
/// subscription) or hands back a future that resolves to the unsubscribe
/// decision later. The dispatcher removes the subscription when the decision
/// is `Unsubscribe` or the deferred future resolves to `true`.
pub enum Outcome {
    /// Message handled, subscription kept.
    Handled,
    /// Message handled, remove this subscription before the next delivery.
    Unsubscribe,
    /// Decision pending; resolves to `true` to unsubscribe.
    Deferred(BoxFuture<'static, Result<bool, CallbackError>>),
}

impl Outcome {
    /// Wrap an async decision as a deferred outcome.
    pub fn deferred<F>(fut: F) -> Self
    where
        F: Future<Output = Result<bool, CallbackError>> + Send + 'static,
    {
        Outcome::Deferred(Box::pin(fut))
    }
}

pub type Callback<M> = Box<dyn FnMut(&M) -> Result<Outcome, CallbackError> + Send>;

pub struct Registry<M> {
    callbacks: BTreeMap<SubscriptionId, Callback<M>>,
    next_id: SubscriptionId,
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Registry<M> {
    pub fn new() -> Self {
        Self {
            callbacks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store `callback` under a freshly minted id and return the id.
    pub fn subscribe(&mut self, callback: Callback<M>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    /// Remove the subscription if present. Returns whether a removal
    /// occurred; a second call with the same id returns `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.callbacks.contains_key(&id)
    }

    /// Snapshot of the currently registered ids, in registration order.
    ///
    /// The dispatcher iterates this snapshot rather than the live table so
    /// that removals during a delivery cannot skew the walk.
    pub fn ids(&self) -> Vec<SubscriptionId> {
        self.callbacks.keys().copied().collect()
    }

    pub fn callback_mut(&mut self, id: SubscriptionId) -> Option<&mut Callback<M>> {
        self.callbacks.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
