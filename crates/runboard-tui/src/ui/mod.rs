//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, progress bar, marker track and leaderboard
//! - `input`: keyboard event handling
//! - `styles`: colour palette and rank colours

pub mod input;
pub mod render;
pub mod styles;
