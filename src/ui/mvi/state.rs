//! Marker trait for reducer state.

/// State owned by a reducer.
///
/// `Default` lets callers `std::mem::take` the state for a by-value reduce;
/// `PartialEq` lets tests and views detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
