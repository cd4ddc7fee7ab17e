//! Zellij plugin entry point.
//!
//! The plugin and its worker are only built for the wasm target; see
//! `plugin.rs` for the host integration. A native build produces a stub
//! binary so the library and its tests build with a plain `cargo test`.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin;

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(plugin::State);
#[cfg(target_family = "wasm")]
register_worker!(plugin::WorkerHost, movielist_worker, MOVIELIST_WORKER);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("movielist is a Zellij plugin: build it with --target wasm32-wasip1 and load the .wasm from a layout");
}
