//! Marker trait for intents.

/// An event a reducer can consume.
///
/// Covers key presses, host lifecycle changes and results of async work
/// delivered back to the owning thread.
pub trait Intent: Send + 'static {}
