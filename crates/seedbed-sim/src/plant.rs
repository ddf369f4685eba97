//! Plant growth and mutation state machine.
//!
//! This module provides a single plant instance's lifecycle:
//! - Growth through five ordered stages, seed to harvestable
//! - Growth rate driven by water and fertilizer
//! - One-shot mutations rolled at planting and on stage advances
//! - Intrinsic value used for display
//!
//! Water depletion is checked once per [`Plant::update`] call, not per
//! elapsed second: once more than [`WATER_DEPLETION_DELAY`] seconds have passed
//! since the last watering, every call removes one unit. Hosts must tick at a
//! steady, frequent cadence for depletion to behave as intended.

use seedbed_common::{RandomSource, TilePos};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::species::{PlantKind, Rgb, SpeciesTable};

/// Growth rate bonus at full water.
pub const WATERING_BONUS: f32 = 0.5;
/// Growth rate bonus when fertilized.
pub const FERTILIZER_BONUS: f32 = 0.3;
/// Growth rate factor when the plant has no water.
pub const DRY_GROWTH_FACTOR: f32 = 0.5;
/// Seconds after the last watering before water starts depleting.
pub const WATER_DEPLETION_DELAY: f32 = 10.0;
/// Planting-time mutation chance as a fraction of the species chance.
const INITIAL_MUTATION_FACTOR: f64 = 0.1;
/// Mutation chance multiplier when fertilized.
const FERTILIZED_MUTATION_FACTOR: f64 = 1.5;
/// Mutation chance multiplier at full water.
const WATERED_MUTATION_FACTOR: f64 = 1.2;

/// Growth stage of a plant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Just planted.
    #[default]
    Seed,
    /// Small sprout visible.
    Sprout,
    /// Young plant.
    SmallPlant,
    /// Fully grown, not yet ripe.
    MaturePlant,
    /// Ready to harvest.
    Harvestable,
}

impl GrowthStage {
    /// The final stage; plants stop advancing here.
    pub const FINAL: Self = Self::Harvestable;

    /// Get the stage name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Sprout => "sprout",
            Self::SmallPlant => "small_plant",
            Self::MaturePlant => "mature_plant",
            Self::Harvestable => "harvestable",
        }
    }

    /// Ordinal of this stage (seed = 0).
    #[must_use]
    pub fn index(self) -> u32 {
        match self {
            Self::Seed => 0,
            Self::Sprout => 1,
            Self::SmallPlant => 2,
            Self::MaturePlant => 3,
            Self::Harvestable => 4,
        }
    }

    /// Get the next growth stage, or `None` at the final stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Seed => Some(Self::Sprout),
            Self::Sprout => Some(Self::SmallPlant),
            Self::SmallPlant => Some(Self::MaturePlant),
            Self::MaturePlant => Some(Self::Harvestable),
            Self::Harvestable => None,
        }
    }

    /// Check if this is the final stage.
    #[must_use]
    pub fn is_final(self) -> bool {
        self == Self::FINAL
    }

    /// Get all stages in order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Seed,
            Self::Sprout,
            Self::SmallPlant,
            Self::MaturePlant,
            Self::Harvestable,
        ]
    }
}

/// Mutation kinds a plant can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// Rolled at planting: head start on growth.
    EarlyGrowth,
    /// Rolled on a stage advance: bigger, more valuable plant.
    GrowthSpurt,
}

impl Mutation {
    /// Get the mutation tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EarlyGrowth => "early_growth",
            Self::GrowthSpurt => "growth_spurt",
        }
    }

    /// Value multiplier the mutation sets.
    #[must_use]
    pub fn value_multiplier(self) -> f64 {
        match self {
            Self::EarlyGrowth => 1.2,
            Self::GrowthSpurt => 1.5,
        }
    }

    /// Size multiplier the mutation sets, if it changes size.
    #[must_use]
    pub fn size_multiplier(self) -> Option<f32> {
        match self {
            Self::EarlyGrowth => None,
            Self::GrowthSpurt => Some(1.3),
        }
    }

    /// Growth progress granted immediately.
    #[must_use]
    pub fn progress_bonus(self) -> f32 {
        match self {
            Self::EarlyGrowth => 0.3,
            Self::GrowthSpurt => 0.0,
        }
    }
}

/// Outcome of an update that crossed into a new stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageAdvance {
    /// Stage the plant entered.
    pub stage: GrowthStage,
    /// Mutation applied on entering it, if any.
    pub mutation: Option<Mutation>,
}

/// A planted plant instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    kind: PlantKind,
    position: TilePos,
    name: String,
    base_growth_time: f32,
    max_water: u8,
    base_value: u32,
    base_mutation_chance: f64,
    color: Rgb,

    stage: GrowthStage,
    growth_progress: f32,
    growth_timer: f32,
    stage_timer: f32,

    water_level: u8,
    last_watered: f32,
    fertilized: bool,

    mutations: Vec<Mutation>,
    mutation_multiplier: f64,
    size_multiplier: f32,
}

impl Plant {
    /// Create a freshly planted seed.
    ///
    /// Growth parameters come from `species`, falling back to its default
    /// species when `kind` has no definition. Rolls the planting-time
    /// early-growth mutation.
    pub fn new(
        kind: PlantKind,
        position: TilePos,
        species: &SpeciesTable,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let def = species.resolve(kind);
        let mut plant = Self {
            kind,
            position,
            name: def.name.clone(),
            base_growth_time: def.growth_time,
            max_water: def.water_need,
            base_value: def.base_value,
            base_mutation_chance: def.mutation_chance,
            color: def.color,
            stage: GrowthStage::Seed,
            growth_progress: 0.0,
            growth_timer: 0.0,
            stage_timer: 0.0,
            water_level: 0,
            last_watered: 0.0,
            fertilized: false,
            mutations: Vec::new(),
            mutation_multiplier: 1.0,
            size_multiplier: 1.0,
        };

        if rng.chance(plant.base_mutation_chance * INITIAL_MUTATION_FACTOR) {
            plant.apply_mutation(Mutation::EarlyGrowth);
        }

        plant
    }

    /// Advance the plant by `dt` seconds.
    ///
    /// Returns the stage entered if this update crossed a stage boundary.
    /// At most one stage is advanced per call.
    pub fn update(&mut self, dt: f32, rng: &mut dyn RandomSource) -> Option<StageAdvance> {
        let dt = dt.max(0.0);
        self.growth_timer += dt;
        self.stage_timer += dt;

        self.growth_progress += self.growth_rate() * dt;

        let mut advance = None;
        if self.growth_progress >= 1.0 {
            if let Some(next) = self.stage.next() {
                advance = Some(self.advance_to(next, rng));
            }
        }

        if self.growth_timer - self.last_watered > WATER_DEPLETION_DELAY {
            self.water_level = self.water_level.saturating_sub(1);
        }

        advance
    }

    /// Current growth progress per second.
    #[must_use]
    pub fn growth_rate(&self) -> f32 {
        let base_rate = 1.0 / self.base_growth_time;

        let water_factor = if self.water_level >= self.max_water {
            1.0 + WATERING_BONUS
        } else if self.water_level == 0 {
            DRY_GROWTH_FACTOR
        } else {
            1.0
        };

        let fertilizer_factor = if self.fertilized {
            1.0 + FERTILIZER_BONUS
        } else {
            1.0
        };

        base_rate * water_factor * fertilizer_factor
    }

    fn advance_to(&mut self, next: GrowthStage, rng: &mut dyn RandomSource) -> StageAdvance {
        self.stage = next;
        self.growth_progress = 0.0;
        self.stage_timer = 0.0;
        debug!("{} at {} reached {}", self.name, self.position, next.name());

        // No mutation roll on the first advance out of the seed stage.
        let mutation = if next.index() > 1 {
            self.roll_growth_mutation(rng)
        } else {
            None
        };

        StageAdvance {
            stage: next,
            mutation,
        }
    }

    fn roll_growth_mutation(&mut self, rng: &mut dyn RandomSource) -> Option<Mutation> {
        if self.is_mutated() {
            return None;
        }

        let mut chance = self.base_mutation_chance;
        if self.fertilized {
            chance *= FERTILIZED_MUTATION_FACTOR;
        }
        if self.has_full_water() {
            chance *= WATERED_MUTATION_FACTOR;
        }

        if rng.chance(chance) {
            self.apply_mutation(Mutation::GrowthSpurt);
            Some(Mutation::GrowthSpurt)
        } else {
            None
        }
    }

    fn apply_mutation(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
        self.mutation_multiplier = mutation.value_multiplier();
        if let Some(size) = mutation.size_multiplier() {
            self.size_multiplier = size;
        }
        self.growth_progress += mutation.progress_bonus();
        debug!("{} at {} mutated: {}", self.name, self.position, mutation.name());
    }

    /// Scale the current growth progress (poor-soil penalty at planting).
    pub(crate) fn scale_progress(&mut self, factor: f32) {
        self.growth_progress *= factor;
    }

    /// Add one unit of water. Returns `false` if already full.
    pub fn water(&mut self) -> bool {
        if self.water_level >= self.max_water {
            return false;
        }
        self.water_level += 1;
        self.last_watered = self.growth_timer;
        true
    }

    /// Apply fertilizer. Returns `false` if already fertilized.
    pub fn fertilize(&mut self) -> bool {
        if self.fertilized {
            return false;
        }
        self.fertilized = true;
        true
    }

    /// Intrinsic value: base × stage × mutation × care, truncated.
    ///
    /// Care bonus here is +0.3 fertilized and +0.2 at full water; the market
    /// valuation in [`crate::economy`] uses its own, smaller care bonus.
    #[must_use]
    pub fn current_value(&self) -> u64 {
        let stage_multiplier = 1.0 + f64::from(self.stage.index()) * 0.2;

        let mut care_bonus = 1.0;
        if self.fertilized {
            care_bonus += 0.3;
        }
        if self.has_full_water() {
            care_bonus += 0.2;
        }

        (f64::from(self.base_value) * stage_multiplier * self.mutation_multiplier * care_bonus)
            as u64
    }

    /// Check if the plant is ready for harvest.
    #[must_use]
    pub fn is_harvestable(&self) -> bool {
        self.stage.is_final()
    }

    /// Rendered size: grows with stage, scaled by mutations.
    #[must_use]
    pub fn visual_size(&self) -> f32 {
        (0.3 + self.stage.index() as f32 * 0.15) * self.size_multiplier
    }

    /// Plant kind.
    #[must_use]
    pub fn kind(&self) -> PlantKind {
        self.kind
    }

    /// Tile this plant occupies.
    #[must_use]
    pub fn position(&self) -> TilePos {
        self.position
    }

    /// Display name of the species the plant grows as.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Current growth stage.
    #[must_use]
    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    /// Progress towards the next stage.
    #[must_use]
    pub fn growth_progress(&self) -> f32 {
        self.growth_progress
    }

    /// Seconds since planting.
    #[must_use]
    pub fn age(&self) -> f32 {
        self.growth_timer
    }

    /// Seconds spent in the current stage.
    #[must_use]
    pub fn time_in_stage(&self) -> f32 {
        self.stage_timer
    }

    /// Current water units.
    #[must_use]
    pub fn water_level(&self) -> u8 {
        self.water_level
    }

    /// Water capacity.
    #[must_use]
    pub fn max_water(&self) -> u8 {
        self.max_water
    }

    /// Check if water is at capacity.
    #[must_use]
    pub fn has_full_water(&self) -> bool {
        self.water_level >= self.max_water
    }

    /// Water level as a fraction of capacity.
    #[must_use]
    pub fn water_fraction(&self) -> f32 {
        f32::from(self.water_level) / f32::from(self.max_water.max(1))
    }

    /// Whether fertilizer was applied.
    #[must_use]
    pub fn is_fertilized(&self) -> bool {
        self.fertilized
    }

    /// Whether any mutation was applied.
    #[must_use]
    pub fn is_mutated(&self) -> bool {
        !self.mutations.is_empty()
    }

    /// Mutations in the order they were applied.
    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Value multiplier from mutations.
    #[must_use]
    pub fn mutation_multiplier(&self) -> f64 {
        self.mutation_multiplier
    }

    /// Size multiplier from mutations.
    #[must_use]
    pub fn size_multiplier(&self) -> f32 {
        self.size_multiplier
    }

    #[cfg(test)]
    pub(crate) fn force_stage(&mut self, stage: GrowthStage) {
        self.stage = stage;
    }

    #[cfg(test)]
    pub(crate) fn force_mutation(&mut self, mutation: Mutation) {
        self.apply_mutation(mutation);
    }
}
