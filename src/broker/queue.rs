//! Per-topic message queue with combination cascade
//!
//! The queue keeps one FIFO buffer per topic plus a parallel list recording
//! the order in which topics first appeared, so a flattened traversal is
//! deterministic: topics in creation order, messages in queue order within a
//! topic.
//!
//! When a combinator is configured, every push runs the cascade: the incoming
//! message repeatedly probes the current last entry of its topic's buffer,
//! one step backward at a time. Each successful combination pops the probed
//! entry and the combined result becomes the new incoming message; the first
//! non-combinable entry stops the cascade. A single push can therefore
//! collapse an arbitrary run of trailing entries, but it never skips over an
//! entry that refused to combine.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use super::combine::Combinator;
use super::message::Topical;

pub struct TopicQueue<M> {
    buffers: HashMap<String, VecDeque<M>>,
    // Topic keys in first-creation order; kept in lockstep with `buffers`.
    order: Vec<String>,
    combinator: Option<Combinator<M>>,
}

impl<M: Topical> Default for TopicQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Topical> TopicQueue<M> {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            order: Vec::new(),
            combinator: None,
        }
    }

    pub fn with_combinator(combinator: Combinator<M>) -> Self {
        Self {
            buffers: HashMap::new(),
            order: Vec::new(),
            combinator: Some(combinator),
        }
    }

    /// Append `message` to its topic's buffer, running the combination
    /// cascade first when a combinator is configured.
    pub fn push(&mut self, message: M) {
        let topic = message.topic().to_string();
        if !self.buffers.contains_key(&topic) {
            self.order.push(topic.clone());
        }
        let buffer = self.buffers.entry(topic.clone()).or_default();

        let mut incoming = message;
        if let Some(combine) = &self.combinator {
            while let Some(last) = buffer.back() {
                match combine(last, &incoming) {
                    Some(combined) => {
                        buffer.pop_back();
                        incoming = combined;
                        trace!(topic = %topic, pending = buffer.len(), "combined trailing message");
                    }
                    None => break,
                }
            }
        }
        buffer.push_back(incoming);
    }

    /// Total number of queued messages across all topics.
    pub fn len(&self) -> usize {
        self.buffers.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.values().all(VecDeque::is_empty)
    }

    /// Discard all topics and their contents.
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.order.clear();
    }

    /// Ordered flattening of the current contents: topics in the order they
    /// were first created, FIFO within a topic. The result is a snapshot;
    /// later pushes or pops do not affect it.
    pub fn snapshot(&self) -> Vec<M>
    where
        M: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        for topic in &self.order {
            if let Some(buffer) = self.buffers.get(topic) {
                out.extend(buffer.iter().cloned());
            }
        }
        out
    }

    /// Remove and return the oldest queued message for `topic`. The topic's
    /// buffer and order slot are dropped once it empties.
    pub fn pop_front(&mut self, topic: &str) -> Option<M> {
        let buffer = self.buffers.get_mut(topic)?;
        let message = buffer.pop_front();
        if buffer.is_empty() {
            self.buffers.remove(topic);
            self.order.retain(|t| t != topic);
        }
        message
    }
}
