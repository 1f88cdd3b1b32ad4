//! Page state and its HTML templates. Every value reaches the markup
//! through askama, which escapes it on the way out.

pub mod document;
pub mod render;

pub use document::{AdminGames, Document, GameForm, HistoryRegion, Prompt, Screen, SlotsRegion};
