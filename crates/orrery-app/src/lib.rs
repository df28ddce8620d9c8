//! Orrery application: window, event handling, and the frame loop.

pub mod frame;
pub mod window;

pub use window::{OrreryApp, run_with_config};
