//! Message combination
//!
//! A combinator is a pure function deciding whether two adjacent same-topic
//! messages collapse into one. `combine(older, newer)` returning `Some(m)`
//! replaces both inputs with `m` in the queue; `None` leaves them as
//! neighbours. The queue never hands the combinator messages from different
//! topics, and it does not validate the result's topic; a combinator that
//! returns a message on another topic gets unspecified ordering, not an
//! error.

pub type Combinator<M> = Box<dyn Fn(&M, &M) -> Option<M> + Send + Sync>;
