//! Input handling module
//!
//! Provides input mapping from raw events to window-level actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
