//! Scripted player used by the headless demo.

use seedbed_sim::prelude::*;
use tracing::debug;

/// What the farmer did during one round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    /// Seeds planted
    pub planted: u32,
    /// Waterings applied
    pub watered: u32,
    /// Plants harvested
    pub harvested: u32,
    /// Money earned from harvests
    pub earned: u64,
    /// Whether an expansion was bought
    pub expanded: bool,
}

/// Greedy farmer: harvest what is ripe, keep plants watered, fill empty
/// soil with the best-priced crop and buy land once there is a cash cushion.
#[derive(Debug, Clone)]
pub struct AutoFarmer {
    /// Money kept in reserve after buying an expansion
    pub reserve: u64,
    /// Fertilize plants as well as watering them
    pub fertilize: bool,
}

impl Default for AutoFarmer {
    fn default() -> Self {
        Self {
            reserve: 50,
            fertilize: true,
        }
    }
}

impl AutoFarmer {
    /// Run one round of chores against the simulation.
    pub fn play_round(&self, sim: &mut Simulation) -> RoundReport {
        let mut report = RoundReport::default();

        for pos in sim.garden().plant_positions() {
            match sim.harvest_plant(pos) {
                Ok(value) => {
                    report.harvested += 1;
                    report.earned += value;
                },
                Err(ActionRejected::NotHarvestable(_)) => {
                    if sim.water_plant(pos).is_ok() {
                        report.watered += 1;
                    }
                    if self.fertilize {
                        let _ = sim.fertilize_plant(pos);
                    }
                },
                Err(e) => debug!("Skipping {pos}: {e}"),
            }
        }

        let crop = sim.economy().best_investment();
        for pos in sim.garden().plantable_positions() {
            if sim.plant_seed(pos, crop).is_ok() {
                report.planted += 1;
            }
        }

        let cost = sim.config().expansion_cost;
        if sim.garden().can_expand() && sim.economy().can_afford(cost + self.reserve) {
            report.expanded = sim.purchase_expansion().is_ok();
        }

        report
    }
}
