//! Keyboard input handling
//!
//! This crate turns winit key events into the per-frame
//! [`FrameInput`](chargejump_core::FrameInput) the simulation consumes.

mod keyboard;

pub use keyboard::KeyboardController;
