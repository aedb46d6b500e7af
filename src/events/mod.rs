//! Typed output events emitted by the engine.

pub mod event;

pub use event::MatchEvent;
