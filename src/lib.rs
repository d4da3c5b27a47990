//! # CoalSub
//!
//! `coalsub` is an in-process, topic-keyed publish/subscribe bus with an
//! optional message-coalescing queue. Producers enqueue typed messages and
//! consumers register callbacks without either side knowing about the other;
//! adjacent same-topic messages can be collapsed by a pluggable combinator
//! before delivery.
//!
//! ## Core Modules
//!
//! The library is structured into two modules:
//!
//! - `broker`: the bus itself — subscription registry, per-topic coalescing
//!   queue, and the `PubSub` facade driving the drain/deliver protocol.
//! - `utils`: shared utilities — the publish error taxonomy and a logging
//!   bootstrap.
//!
//! ## Example
//!
//! ```
//! use coalsub::broker::{Message, Outcome, PubSub};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), coalsub::utils::error::PublishError> {
//! let mut bus = PubSub::new();
//! bus.subscribe(|msg: &Message| {
//!     println!("{}: {}", msg.topic, msg.payload);
//!     Ok(Outcome::Handled)
//! });
//! bus.publish(Message::new("sensor/temp", json!({ "celsius": 21 }))).await?;
//! # Ok(())
//! # }
//! ```

pub mod broker;
pub mod utils;
