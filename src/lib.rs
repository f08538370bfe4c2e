//! Shellshow library exports: the deck parser and navigator in [`core`],
//! the terminal presenter in [`tui`].

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use core::action::{Action, Effect, update};
pub use core::canonical::to_markdown;
pub use core::model::{Block, BlockKind, Page, Presentation, ProjectMetadata, StyleSpec};
pub use core::navigation::{NavigationState, Navigator};
pub use core::parser::parse;
