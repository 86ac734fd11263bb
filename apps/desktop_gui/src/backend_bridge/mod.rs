//! Bridge between the UI thread and the async runtime that drives loading timers.

pub mod runtime;
