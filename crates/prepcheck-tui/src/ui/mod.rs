//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `steps`: Widgets of the current wizard step
//! - `results`: The assessment result panel
//! - `review`: Summary of the entered answers

pub mod input;
pub mod render;
pub mod results;
pub mod review;
pub mod steps;
pub mod styles;
