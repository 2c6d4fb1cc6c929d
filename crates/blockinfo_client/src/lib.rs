//! Text generation and layout for block information shown while building.

pub mod cache;
pub mod engine;
pub mod facts;
pub mod format;
pub mod glyphs;
pub mod hardcoded;
pub mod host;
pub mod layout;
pub mod lines;
pub mod palette;
pub mod scroll;
pub mod settings;
pub mod units;
