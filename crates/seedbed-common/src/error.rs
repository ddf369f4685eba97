//! Error types for Seedbed.

use crate::coords::TilePos;
use thiserror::Error;

/// Reason a host command did not take effect.
///
/// None of these are fatal: the simulation state is unchanged whenever one
/// is returned, and the host turns it into user feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    /// Position is outside the grid
    #[error("Position {0} is outside the garden")]
    OutOfBounds(TilePos),

    /// Tile already holds a plant
    #[error("Tile {0} is already occupied")]
    Occupied(TilePos),

    /// Tile soil quality is zero
    #[error("Soil at {0} is not plantable")]
    UnplantableSoil(TilePos),

    /// Tile holds no plant
    #[error("No plant at {0}")]
    NoPlant(TilePos),

    /// Plant water is already at its maximum
    #[error("Plant at {0} is already fully watered")]
    WaterFull(TilePos),

    /// Plant was fertilized before
    #[error("Plant at {0} is already fertilized")]
    AlreadyFertilized(TilePos),

    /// Plant has not reached its final stage
    #[error("Plant at {0} is not ready to harvest")]
    NotHarvestable(TilePos),

    /// Not enough money for a purchase
    #[error("Insufficient funds: need {needed}, have {have}")]
    InsufficientFunds {
        /// Amount needed
        needed: u64,
        /// Amount available
        have: u64,
    },

    /// Garden cannot be expanded further
    #[error("Garden is already at its maximum of {max} expansions")]
    ExpansionLimit {
        /// Expansion cap
        max: u32,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for host commands.
pub type ActionResult<T> = Result<T, ActionRejected>;
