//! ChargeJump - a charge-and-release precision platformer
//!
//! The binary wires configuration, a window and keyboard input to the
//! simulation in `chargejump_core`.

pub mod config;
pub mod input;
pub mod systems;
