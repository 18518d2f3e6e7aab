//! Arrow-key scroll guard and the sliding-tile game it was built for
//!
//! The guard ([`libs::scroll_guard`]) cancels the page scroll that arrow keys trigger in a
//! browser, so the same keys can drive the game without moving the viewport.

pub mod libs;
pub mod state;
pub mod utils;
