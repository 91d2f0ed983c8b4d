//! Typewriter reveal: options, progress state, the timer-driven engine and its output sinks.

pub(crate) mod engine;
pub(crate) mod options;
pub(crate) mod sink;
pub(crate) mod state;
