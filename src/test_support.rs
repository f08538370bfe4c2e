//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::navigation::Navigator;
use crate::core::parser::parse;

/// A three-page deck touching most block kinds.
pub const SAMPLE_DECK: &str = "\
<!--
title: Sample Deck
author: Test Author
-->
# Welcome

<!-- style[bold] -->
Opening line
- first point
- second point

# Details
## Code
```rust
fn main() {}
```
| A | B |
|---|---|
| 1 | 2 |

# Wrap-up
> [!TIP]
> Keep it short.
---
";

/// Navigator over [`SAMPLE_DECK`], positioned at the start.
pub fn sample_navigator() -> Navigator {
    Navigator::new(parse(SAMPLE_DECK)).expect("sample deck has pages")
}
