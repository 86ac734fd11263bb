//! Controller layer: UI intents, reducer-like state transitions, and intent queueing.

pub mod events;
pub mod orchestration;
pub mod reducer;
