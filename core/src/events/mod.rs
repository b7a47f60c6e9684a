//! Event intake and signal emission
//!
//! The host runtime feeds [`TrackerEvent`]s in; the processor routes them
//! through the ledger and emits [`TrackerSignal`]s for the host to act on
//! (broadcasting the victory text is the host's job, not the engine's).

pub mod handler;
pub mod processor;
pub mod signal;

#[cfg(test)]
mod processor_tests;

pub use handler::SignalHandler;
pub use processor::EventProcessor;
pub use signal::{TrackerEvent, TrackerSignal};
