//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (the binary) and the query, storage and
//! worker layers. Data flows one way:
//!
//! ```text
//! Key / WebResult / Worker → Event → handle_event → AppState → Vec<Action>
//!                                         ↑                        ↓
//!                                         └──── responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Key press subscriptions
//! - [`modes`]: Input focus and pane types
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::{Key, KeyBindings, Subscription};
pub use modes::{InputMode, Pane};
pub use state::AppState;
