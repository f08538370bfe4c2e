//! # TUI Components
//!
//! Every screen element of the presentation.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as fields and are rebuilt each frame:
//! - `StatusBar`: deck title, page and block counters
//! - `TitlePage`: front matter title, author and date
//! - `BlockView`: one revealed block
//!
//! ### Stateful Components (Event-Driven)
//!
//! A transient wrapper borrows persistent state kept in `TuiState`:
//! - `SlideView` / `SlideState`: the scrollable page body
//! - `Contents` / `ContentsState`: the page list, as a page or an overlay
//!
//! Each component file holds its state types, events, rendering and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── status_bar.rs  (Top status line)
//! ├── title_page.rs  (Opening screen)
//! ├── contents.rs    (Page list and overlay)
//! ├── slide.rs       (Scrollable page body)
//! └── block_view.rs  (Single block renderer)
//! ```

pub mod block_view;
pub mod contents;
pub mod slide;
pub mod status_bar;
pub mod title_page;

pub use block_view::{BlockView, RenderSettings};
pub use contents::{Contents, ContentsEvent, ContentsState};
pub use slide::{SlideState, SlideView};
pub use status_bar::StatusBar;
pub use title_page::TitlePage;
