//! Browser rendering engine for lazy-loaded listing pages.
//!
//! Provides headless browser control for driving a rendered search page
//! through scroll-triggered content loading and snapshotting its markup.

pub mod engine;
pub mod error;
pub mod renderer;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use renderer::{PageRenderer, PageSession, ScrollPolicy};
