//! Input focus and pane types.
//!
//! The input mode decides how a key press is interpreted:
//! - **Typing**: printable keys edit the search text
//! - **Navigating**: keys are commands (move, select, rate, add, delete)
//!
//! The focused pane decides which list the cursor moves in.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys edit the search text. Enter or Esc leave this mode.
    #[default]
    Typing,

    /// Keys are commands. `/` returns to typing with a cleared query.
    Navigating,
}

/// List that currently owns the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Search results.
    #[default]
    Results,

    /// The watch list. Only visible while no movie is open.
    Watched,
}

impl Pane {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Results => Self::Watched,
            Self::Watched => Self::Results,
        }
    }
}
