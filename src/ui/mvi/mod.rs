//! Model-View-Intent (MVI) primitives.
//!
//! Every stateful feature (the app lock, the settings panel) is a
//! unidirectional loop:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot with everything the view needs
//! - **Intent**: User input, lifecycle changes, async results
//! - **Reducer**: Pure function producing the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
