//! Application systems
//!
//! Frame timing and window management, kept out of main.rs.

mod simulation;
mod window;

pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{WindowError, WindowSystem};
