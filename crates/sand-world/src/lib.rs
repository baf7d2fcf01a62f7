//! World simulation engine.
//!
//! The grid of material cells, the per-tick update rules, the dog controller
//! and the frame-level driver that ties them together.

pub mod grid;
pub mod placement;
pub mod engine;
pub mod creature;
pub mod simulation;

pub use grid::Grid;
pub use placement::Placer;
pub use engine::{TickStats, UpdateEngine};
pub use creature::{CreatureController, DogStep};
pub use simulation::{Brush, Frame, FrameCell, FrameInput, FrameReport, Simulation};
