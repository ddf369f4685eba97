//! # Seedbed Sim
//!
//! Headless garden simulation engine.
//!
//! This crate provides the simulation core and its host surface:
//! - Species table and per-plant growth/mutation state machine
//! - Garden grid owning plants through a stable-id arena
//! - Market economy with price drift, booms, crashes and milestones
//! - Weather and the day clock that fires random events
//! - Event bus, read-only snapshots and a thread-safe handle
//! - TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod economy;
pub mod effects;
pub mod events;
pub mod garden;
pub mod plant;
pub mod shared;
pub mod simulation;
pub mod snapshot;
pub mod species;
pub mod weather;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::economy::*;
    pub use crate::effects::*;
    pub use crate::events::*;
    pub use crate::garden::*;
    pub use crate::plant::*;
    pub use crate::shared::*;
    pub use crate::simulation::*;
    pub use crate::snapshot::*;
    pub use crate::species::*;
    pub use crate::weather::*;
    pub use seedbed_common::prelude::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_then_grow() {
        let mut sim = Simulation::with_random(
            SimulationConfig::default(),
            Box::new(ScriptedRandom::never()),
        );
        let pos = TilePos::new(10, 7);
        sim.plant_seed(pos, PlantKind::Tomato).expect("planted");
        sim.water_plant(pos).expect("watered");
        sim.water_plant(pos).expect("watered");
        sim.water_plant(pos).expect("watered");
        assert_eq!(sim.water_plant(pos), Err(ActionRejected::WaterFull(pos)));

        // Fully watered tomato: 12 s / 1.5 = 8 s per stage.
        sim.tick(8.5);
        assert_eq!(
            sim.garden().plant_at(pos).map(Plant::stage),
            Some(GrowthStage::Sprout)
        );
    }

    #[test]
    fn test_config_drives_simulation() {
        let config = SimulationConfig::from_toml_str(
            r"
            expansion_cost = 50

            [garden]
            width = 9
            height = 9
            starter_plot_size = 3

            [economy]
            starting_money = 60
            ",
        )
        .expect("valid toml");
        let mut sim = Simulation::new(config);
        assert_eq!(sim.garden().plantable_count(), 9);
        assert!(sim.purchase_expansion().is_ok());
        assert_eq!(sim.economy().money(), 10);
        // Half-width 1 times two expansions: 5x5.
        assert_eq!(sim.garden().plantable_count(), 25);
    }
}
