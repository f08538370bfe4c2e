//! # Core Application Logic
//!
//! This module contains Shellshow's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • parse() text → deck  │
//!                    │  • Navigator (state)    │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No UI. Pure parsing.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  --outline │      │   --json   │
//!     │  Adapter   │      │  listing   │      │   dump     │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Presentation`, `Page`, `Block` and friends
//! - [`directive`]: `style[...]` / `meta[...]` lines → `StyleSpec`
//! - [`front_matter`]: the leading `<!-- ... -->` block → `ProjectMetadata`
//! - [`parser`]: deck text → `Presentation`
//! - [`canonical`]: `Presentation` → canonical Markdown
//! - [`navigation`]: the `Navigator` reveal/page state machine
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`loader`]: reading decks from disk
//! - [`config`]: `~/.shellshow/config.toml`

pub mod action;
pub mod canonical;
pub mod config;
pub mod directive;
pub mod front_matter;
pub mod loader;
pub mod model;
pub mod navigation;
pub mod parser;
