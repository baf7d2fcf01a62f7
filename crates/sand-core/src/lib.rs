//! Core types and utilities for the falling-sand cellular automaton.

pub mod types;
pub mod config;
pub mod error;
pub mod catalog;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use catalog::MaterialCatalog;
