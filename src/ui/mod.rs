//! User interface layer.
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render_lines → stdout
//! ```
//!
//! - [`viewmodel`]: Display-ready types, including which pane branch renders
//! - [`renderer`]: Plain text rendering
//! - [`helpers`]: List windowing and truncation

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_lines};
pub use viewmodel::{
    DetailPane, DetailView, FooterInfo, HeaderInfo, ListWindow, RatingView, ResultRow,
    SearchBarInfo, SearchPane, SidePane, ViewModel, WatchedPane, WatchedRow,
};
