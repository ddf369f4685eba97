//! Read-only views of simulation state for hosts.
//!
//! Everything here is plain data: hosts render it, log it, or serialize it
//! with [`SimulationSnapshot::to_json_pretty`].

use seedbed_common::{PlantId, TilePos};
use serde::Serialize;

use crate::economy::EconomySummary;
use crate::garden::{GardenGrid, Tile};
use crate::plant::{Mutation, Plant};
use crate::species::{PlantKind, Rgb};
use crate::weather::Weather;

/// State of one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSnapshot {
    /// Tile position.
    pub pos: TilePos,
    /// Soil quality.
    pub soil_quality: f32,
    /// Water buffer.
    pub water_level: u8,
    /// Fertilizer buffer.
    pub fertilizer_level: u8,
    /// Plant on the tile.
    pub plant: Option<PlantId>,
}

impl TileSnapshot {
    /// Capture a tile.
    #[must_use]
    pub fn new(pos: TilePos, tile: &Tile) -> Self {
        Self {
            pos,
            soil_quality: tile.soil_quality,
            water_level: tile.water_level,
            fertilizer_level: tile.fertilizer_level,
            plant: tile.plant(),
        }
    }
}

/// Status of one plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantStatus {
    /// Plant id.
    pub id: PlantId,
    /// Plant tile.
    pub pos: TilePos,
    /// Plant kind.
    pub kind: PlantKind,
    /// Species display name.
    pub name: String,
    /// Species display color.
    pub color: Rgb,
    /// Stage name.
    pub stage: &'static str,
    /// Progress towards the next stage.
    pub growth_progress: f32,
    /// Seconds since planting.
    pub age: f32,
    /// Seconds in the current stage.
    pub time_in_stage: f32,
    /// Current water units.
    pub water_level: u8,
    /// Water capacity.
    pub max_water: u8,
    /// Water as a fraction of capacity.
    pub water_fraction: f32,
    /// Fertilizer applied.
    pub fertilized: bool,
    /// Any mutation applied.
    pub mutated: bool,
    /// Mutations applied.
    pub mutations: Vec<Mutation>,
    /// Intrinsic value.
    pub value: u64,
    /// Value if sold now.
    pub market_value: u64,
    /// Rendered size.
    pub visual_size: f32,
    /// Ready to harvest.
    pub harvestable: bool,
}

impl PlantStatus {
    /// Capture a plant with its current market value.
    #[must_use]
    pub fn new(id: PlantId, plant: &Plant, market_value: u64) -> Self {
        Self {
            id,
            pos: plant.position(),
            kind: plant.kind(),
            name: plant.name().to_string(),
            color: plant.color(),
            stage: plant.stage().name(),
            growth_progress: plant.growth_progress(),
            age: plant.age(),
            time_in_stage: plant.time_in_stage(),
            water_level: plant.water_level(),
            max_water: plant.max_water(),
            water_fraction: plant.water_fraction(),
            fertilized: plant.is_fertilized(),
            mutated: plant.is_mutated(),
            mutations: plant.mutations().to_vec(),
            value: plant.current_value(),
            market_value,
            visual_size: plant.visual_size(),
            harvestable: plant.is_harvestable(),
        }
    }
}

/// Garden overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenSummary {
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Expansions so far.
    pub expansions: u32,
    /// Expansion cap.
    pub max_expansions: u32,
    /// Plants in the garden.
    pub total_plants: usize,
    /// Tiles with plantable soil.
    pub plantable_tiles: usize,
    /// Rain window active.
    pub raining: bool,
    /// Seconds of rain left.
    pub rain_remaining: f32,
    /// Pest infestation active.
    pub pest_infestation: bool,
    /// Seconds of infestation left.
    pub pest_remaining: f32,
}

impl GardenSummary {
    /// Summarise a garden.
    #[must_use]
    pub fn new(garden: &GardenGrid) -> Self {
        Self {
            width: garden.width(),
            height: garden.height(),
            expansions: garden.expansions(),
            max_expansions: garden.max_expansions(),
            total_plants: garden.plant_count(),
            plantable_tiles: garden.plantable_count(),
            raining: garden.is_raining(),
            rain_remaining: garden.rain_remaining(),
            pest_infestation: garden.pest_active(),
            pest_remaining: garden.pest_remaining(),
        }
    }
}

/// Cumulative harvest statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Plants harvested.
    pub plants_harvested: u64,
    /// Money earned from harvests.
    pub harvest_earnings: u64,
    /// Mutated plants harvested.
    pub mutated_harvested: u64,
}

/// Full read-only view of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    /// Current day (starts at 1).
    pub day: u32,
    /// Seconds simulated.
    pub elapsed: f64,
    /// Current weather.
    pub weather: Weather,
    /// Garden overview.
    pub garden: GardenSummary,
    /// Every tile, row by row.
    pub tiles: Vec<TileSnapshot>,
    /// Every plant, in planting order.
    pub plants: Vec<PlantStatus>,
    /// Finances and market.
    pub economy: EconomySummary,
    /// Harvest statistics.
    pub stats: SimulationStats,
}

impl SimulationSnapshot {
    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Status of the plant on a tile.
    #[must_use]
    pub fn plant_at(&self, pos: TilePos) -> Option<&PlantStatus> {
        self.plants.iter().find(|p| p.pos == pos)
    }
}
