//! Storage layer for persistent key/value data.
//!
//! # Modules
//!
//! - `backend`: The [`Store`] contract and typed helpers
//! - `json`: JSON file backend with atomic writes
//! - `memory`: In-memory backend

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::{read_or, write_value, Store};
pub use json::JsonStore;
pub use memory::MemoryStore;

/// Store key under which the watch list is persisted.
pub const WATCHED_KEY: &str = "watched";
