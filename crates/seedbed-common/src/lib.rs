//! # Seedbed Common
//!
//! Common types and utilities shared by the Seedbed simulation crates.
//!
//! This crate provides the foundational types used across the engine:
//! - Tile coordinates on the garden grid
//! - Stable plant ids for the plant arena
//! - Rejection and configuration error types
//! - Injectable random sources
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod random;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::random::*;
}

pub use prelude::*;
