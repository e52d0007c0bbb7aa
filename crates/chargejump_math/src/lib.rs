//! 2D Mathematics Library
//!
//! This crate provides the small set of value types the ChargeJump simulation
//! is built on.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector (screen space, y grows downward)
//! - [`Rect`] - Axis-aligned rectangle anchored at its top-left corner

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
