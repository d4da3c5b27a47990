pub mod combine;
pub mod engine;
pub mod message;
pub mod queue;
pub mod registry;

pub use combine::Combinator;
pub use engine::PubSub;
pub use message::{Message, Topical};
pub use registry::{Outcome, SubscriptionId};
