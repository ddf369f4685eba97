//! Garden grid: tiles, plant ownership and environmental effects.
//!
//! Plants live in an arena keyed by [`PlantId`]; each tile stores the id of
//! the plant it holds. The arena is the only owner of plant state, so the
//! tile/plant mapping cannot drift: every insertion and removal goes through
//! [`GardenGrid::plant_seed`] and [`GardenGrid::remove_plant`].

use seedbed_common::{ActionRejected, ActionResult, PlantId, PlantIdGen, RandomSource, TilePos};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::{GardenConfig, MAX_GRID_SIDE};
use crate::effects::{ActiveEffects, EffectKind};
use crate::plant::{GrowthStage, Mutation, Plant};
use crate::species::{PlantKind, SpeciesTable};

/// Tile water buffer cap.
pub const MAX_TILE_WATER: u8 = 5;
/// Tile fertilizer buffer cap.
pub const MAX_TILE_FERTILIZER: u8 = 3;
/// Soil quality cap reached through fallow recovery.
pub const MAX_SOIL_QUALITY: f32 = 1.5;
/// Soil quality gained each time a plant is removed.
const SOIL_RECOVERY: f32 = 0.1;
/// Below this soil quality new plants start with reduced progress.
const POOR_SOIL_THRESHOLD: f32 = 0.5;
/// Progress multiplier for plants started on poor soil.
const POOR_SOIL_PENALTY: f32 = 0.8;
/// Soil quality given to tiles unlocked by an expansion.
const EXPANDED_SOIL_QUALITY: f32 = 0.8;
/// Water buffer given to tiles unlocked by an expansion.
const EXPANDED_TILE_WATER: u8 = 1;
/// Water buffer added to each plantable tile by rain.
const RAIN_TILE_WATER: u8 = 2;
/// Most plants a single infestation destroys.
const PEST_MAX_DESTROYED: usize = 3;

/// A single soil tile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Soil quality (0 = unplantable).
    pub soil_quality: f32,
    /// Environmental water buffer.
    pub water_level: u8,
    /// Fertilizer buffer.
    pub fertilizer_level: u8,
    plant: Option<PlantId>,
}

impl Tile {
    /// Id of the plant on this tile.
    #[must_use]
    pub fn plant(&self) -> Option<PlantId> {
        self.plant
    }

    /// Check if a seed could be planted here soil-wise.
    #[must_use]
    pub fn is_plantable(&self) -> bool {
        self.soil_quality > 0.0
    }
}

/// Notable changes produced by [`GardenGrid::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum GardenEvent {
    /// A plant entered a new stage.
    StageAdvanced {
        /// Plant tile
        pos: TilePos,
        /// Plant kind
        kind: PlantKind,
        /// Stage entered
        stage: GrowthStage,
    },
    /// A plant mutated while growing.
    Mutated {
        /// Plant tile
        pos: TilePos,
        /// Mutation applied
        mutation: Mutation,
    },
    /// The rain window ended.
    RainEnded,
    /// The pest infestation window ended.
    PestsCleared,
}

/// Grid of soil tiles owning all planted plants.
#[derive(Debug, Clone)]
pub struct GardenGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    plants: BTreeMap<PlantId, Plant>,
    ids: PlantIdGen,
    species: SpeciesTable,
    starter_half: u32,
    expansions: u32,
    max_expansions: u32,
    effects: ActiveEffects,
}

impl Default for GardenGrid {
    fn default() -> Self {
        Self::new(&GardenConfig::default())
    }
}

impl GardenGrid {
    /// Create a garden with the default species table.
    #[must_use]
    pub fn new(config: &GardenConfig) -> Self {
        Self::with_species(config, SpeciesTable::with_defaults())
    }

    /// Create a garden with a custom species table.
    ///
    /// Every tile starts at `outer_soil_quality`; a square starter plot at the
    /// grid centre gets full soil and the starter water buffer.
    #[must_use]
    pub fn with_species(config: &GardenConfig, species: SpeciesTable) -> Self {
        let width = config.width.clamp(1, MAX_GRID_SIDE);
        let height = config.height.clamp(1, MAX_GRID_SIDE);
        let outer = Tile {
            soil_quality: config.outer_soil_quality.max(0.0),
            ..Tile::default()
        };

        let mut garden = Self {
            width,
            height,
            tiles: vec![outer; width as usize * height as usize],
            plants: BTreeMap::new(),
            ids: PlantIdGen::default(),
            species,
            starter_half: config.starter_plot_size / 2,
            expansions: 1,
            max_expansions: config.max_expansions.max(1),
            effects: ActiveEffects::new(),
        };

        let size = config.starter_plot_size as i32;
        let center = garden.center();
        let start = center.offset(-(size / 2), -(size / 2));
        for y in start.y..start.y + size {
            for x in start.x..start.x + size {
                if let Some(tile) = garden.tile_mut(TilePos::new(x, y)) {
                    tile.soil_quality = 1.0;
                    tile.water_level = config.starter_water.min(MAX_TILE_WATER);
                    tile.fertilizer_level = 0;
                }
            }
        }

        garden
    }

    /// Grid width in tiles.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Centre tile of the grid.
    #[must_use]
    pub fn center(&self) -> TilePos {
        TilePos::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a position lies on the grid.
    #[must_use]
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    fn pos_of(&self, index: usize) -> TilePos {
        let width = self.width as usize;
        TilePos::new((index % width) as i32, (index / width) as i32)
    }

    /// Get the tile at a position.
    #[must_use]
    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        let i = self.index(pos)?;
        Some(&mut self.tiles[i])
    }

    /// Iterate over all tiles with their positions, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (self.pos_of(i), tile))
    }

    /// Overwrite a tile's soil quality (scenario setup and tooling).
    pub fn set_soil_quality(&mut self, pos: TilePos, quality: f32) -> ActionResult<()> {
        let tile = self
            .tile_mut(pos)
            .ok_or(ActionRejected::OutOfBounds(pos))?;
        tile.soil_quality = quality.max(0.0);
        Ok(())
    }

    /// Get the plant on a tile.
    #[must_use]
    pub fn plant_at(&self, pos: TilePos) -> Option<&Plant> {
        let id = self.tile(pos)?.plant?;
        self.plants.get(&id)
    }

    fn plant_at_mut(&mut self, pos: TilePos) -> ActionResult<&mut Plant> {
        let id = self
            .tile(pos)
            .ok_or(ActionRejected::OutOfBounds(pos))?
            .plant
            .ok_or(ActionRejected::NoPlant(pos))?;
        self.plants
            .get_mut(&id)
            .ok_or(ActionRejected::NoPlant(pos))
    }

    /// Get a plant by id.
    #[must_use]
    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(&id)
    }

    /// Iterate over all plants in id order.
    pub fn plants(&self) -> impl Iterator<Item = (PlantId, &Plant)> {
        self.plants.iter().map(|(&id, plant)| (id, plant))
    }

    /// Number of plants in the garden.
    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }

    /// Positions of all plants, row by row.
    #[must_use]
    pub fn plant_positions(&self) -> Vec<TilePos> {
        self.tiles()
            .filter(|(_, tile)| tile.plant.is_some())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Positions of all tiles with plantable soil, row by row.
    #[must_use]
    pub fn plantable_positions(&self) -> Vec<TilePos> {
        self.tiles()
            .filter(|(_, tile)| tile.is_plantable())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of tiles with plantable soil.
    #[must_use]
    pub fn plantable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_plantable()).count()
    }

    /// The species table plants are created from.
    #[must_use]
    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    /// Plant a seed on an empty, plantable tile.
    pub fn plant_seed(
        &mut self,
        pos: TilePos,
        kind: PlantKind,
        rng: &mut dyn RandomSource,
    ) -> ActionResult<PlantId> {
        let tile = self.tile(pos).ok_or(ActionRejected::OutOfBounds(pos))?;
        if tile.plant.is_some() {
            return Err(ActionRejected::Occupied(pos));
        }
        if !tile.is_plantable() {
            return Err(ActionRejected::UnplantableSoil(pos));
        }
        let soil_quality = tile.soil_quality;

        let mut plant = Plant::new(kind, pos, &self.species, rng);
        if soil_quality < POOR_SOIL_THRESHOLD {
            plant.scale_progress(POOR_SOIL_PENALTY);
        }

        let id = self.ids.next_id();
        self.plants.insert(id, plant);
        if let Some(tile) = self.tile_mut(pos) {
            tile.plant = Some(id);
        }
        debug!("Planted {} at {pos}", kind.name());
        Ok(id)
    }

    /// Water the plant on a tile, topping up the tile's water buffer.
    pub fn water_plant(&mut self, pos: TilePos) -> ActionResult<()> {
        if !self.plant_at_mut(pos)?.water() {
            return Err(ActionRejected::WaterFull(pos));
        }
        if let Some(tile) = self.tile_mut(pos) {
            tile.water_level = (tile.water_level + 1).min(MAX_TILE_WATER);
        }
        Ok(())
    }

    /// Fertilize the plant on a tile, topping up the tile's fertilizer buffer.
    pub fn fertilize_plant(&mut self, pos: TilePos) -> ActionResult<()> {
        if !self.plant_at_mut(pos)?.fertilize() {
            return Err(ActionRejected::AlreadyFertilized(pos));
        }
        if let Some(tile) = self.tile_mut(pos) {
            tile.fertilizer_level = (tile.fertilizer_level + 1).min(MAX_TILE_FERTILIZER);
        }
        Ok(())
    }

    /// Remove the plant on a tile, returning it.
    ///
    /// The freed soil recovers a little quality.
    pub fn remove_plant(&mut self, pos: TilePos) -> Option<Plant> {
        let tile = self.tile_mut(pos)?;
        let id = tile.plant.take()?;
        tile.soil_quality = (tile.soil_quality + SOIL_RECOVERY).min(MAX_SOIL_QUALITY);
        self.plants.remove(&id)
    }

    /// Number of expansions so far (the starter plot counts as one).
    #[must_use]
    pub fn expansions(&self) -> u32 {
        self.expansions
    }

    /// Expansion cap.
    #[must_use]
    pub fn max_expansions(&self) -> u32 {
        self.max_expansions
    }

    /// Check if another expansion is possible.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.expansions < self.max_expansions
    }

    /// Grow the plantable area around the grid centre.
    ///
    /// The square's half-width is the starter plot's half-width times the
    /// expansion count. Only unplantable tiles are touched.
    pub fn expand(&mut self) -> ActionResult<()> {
        if !self.can_expand() {
            return Err(ActionRejected::ExpansionLimit {
                max: self.max_expansions,
            });
        }
        self.expansions += 1;

        let radius = self.starter_half.max(1) * self.expansions;
        let center = self.center();
        let mut unlocked = 0;
        for tile_index in 0..self.tiles.len() {
            if self.pos_of(tile_index).chebyshev(center) > radius {
                continue;
            }
            let tile = &mut self.tiles[tile_index];
            if tile.soil_quality == 0.0 {
                tile.soil_quality = EXPANDED_SOIL_QUALITY;
                tile.water_level = EXPANDED_TILE_WATER;
                unlocked += 1;
            }
        }

        info!(
            "Garden expanded to level {} ({unlocked} tiles unlocked)",
            self.expansions
        );
        Ok(())
    }

    /// Rain: water every plant and soak every plantable tile.
    ///
    /// Starts the rain window, or restarts it if already raining.
    pub fn apply_rain(&mut self) {
        for plant in self.plants.values_mut() {
            plant.water();
        }
        for tile in self.tiles.iter_mut().filter(|t| t.is_plantable()) {
            tile.water_level = (tile.water_level + RAIN_TILE_WATER).min(MAX_TILE_WATER);
        }
        self.effects
            .restart(EffectKind::Rain, EffectKind::Rain.duration());
        info!("Rain watered {} plants", self.plants.len());
    }

    /// Start a pest infestation.
    ///
    /// Returns `None` while an infestation is already active. Otherwise
    /// destroys up to three random plants at once and returns their positions;
    /// the infestation then stays active for its window without further damage.
    pub fn trigger_pest_infestation(&mut self, rng: &mut dyn RandomSource) -> Option<Vec<TilePos>> {
        if !self.effects.start(
            EffectKind::PestInfestation,
            EffectKind::PestInfestation.duration(),
        ) {
            return None;
        }

        let occupied = self.plant_positions();
        let destroyed: Vec<TilePos> = rng
            .sample_indices(occupied.len(), PEST_MAX_DESTROYED)
            .into_iter()
            .map(|i| occupied[i])
            .collect();

        for &pos in &destroyed {
            self.remove_plant(pos);
        }

        info!("Pest infestation destroyed {} plants", destroyed.len());
        Some(destroyed)
    }

    /// Check if the rain window is active.
    #[must_use]
    pub fn is_raining(&self) -> bool {
        self.effects.is_active(EffectKind::Rain)
    }

    /// Seconds left in the rain window.
    #[must_use]
    pub fn rain_remaining(&self) -> f32 {
        self.effects.remaining(EffectKind::Rain).unwrap_or(0.0)
    }

    /// Check if a pest infestation is active.
    #[must_use]
    pub fn pest_active(&self) -> bool {
        self.effects.is_active(EffectKind::PestInfestation)
    }

    /// Seconds left in the pest infestation window.
    #[must_use]
    pub fn pest_remaining(&self) -> f32 {
        self.effects
            .remaining(EffectKind::PestInfestation)
            .unwrap_or(0.0)
    }

    /// Advance every plant and effect timer by `dt` seconds.
    pub fn update(&mut self, dt: f32, rng: &mut dyn RandomSource) -> Vec<GardenEvent> {
        let mut events = Vec::new();

        for plant in self.plants.values_mut() {
            if let Some(advance) = plant.update(dt, rng) {
                events.push(GardenEvent::StageAdvanced {
                    pos: plant.position(),
                    kind: plant.kind(),
                    stage: advance.stage,
                });
                if let Some(mutation) = advance.mutation {
                    events.push(GardenEvent::Mutated {
                        pos: plant.position(),
                        mutation,
                    });
                }
            }
        }

        for kind in self.effects.tick(dt) {
            match kind {
                EffectKind::Rain => events.push(GardenEvent::RainEnded),
                EffectKind::PestInfestation => {
                    debug!("Pest infestation cleared");
                    events.push(GardenEvent::PestsCleared);
                },
                EffectKind::MarketBoom | EffectKind::MarketCrash => {},
            }
        }

        events
    }

    /// Check that tiles and the plant arena agree: every referenced id exists,
    /// sits at its tile's position, and no plant is unreferenced.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut referenced = 0;
        for (pos, tile) in self.tiles() {
            if let Some(id) = tile.plant {
                referenced += 1;
                match self.plants.get(&id) {
                    Some(plant) if plant.position() == pos => {},
                    _ => return false,
                }
            }
        }
        referenced == self.plants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_common::{ScriptedRandom, SeededRandom};

    fn garden() -> GardenGrid {
        GardenGrid::default()
    }

    fn never() -> ScriptedRandom {
        ScriptedRandom::never()
    }

    #[test]
    fn test_starter_plot() {
        let garden = garden();
        assert_eq!(garden.center(), TilePos::new(10, 7));
        assert_eq!(garden.plantable_count(), 25);

        let corner = garden.tile(TilePos::new(8, 5)).expect("tile");
        assert!((corner.soil_quality - 1.0).abs() < f32::EPSILON);
        assert_eq!(corner.water_level, 2);

        let outside = garden.tile(TilePos::new(7, 5)).expect("tile");
        assert!(!outside.is_plantable());
        assert!(garden.tile(TilePos::new(20, 0)).is_none());
        assert!(garden.tile(TilePos::new(-1, 0)).is_none());
    }

    #[test]
    fn test_oversized_grid_is_clamped() {
        let config = GardenConfig {
            width: u32::MAX,
            height: u32::MAX,
            ..GardenConfig::default()
        };
        let garden = GardenGrid::new(&config);
        assert_eq!(garden.width(), MAX_GRID_SIDE);
        assert_eq!(garden.height(), MAX_GRID_SIDE);
        assert_eq!(garden.tiles().count(), 512 * 512);
        assert_eq!(garden.plantable_count(), 25);
    }

    #[test]
    fn test_plant_seed() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        let id = garden
            .plant_seed(pos, PlantKind::Carrot, &mut never())
            .expect("planted");

        assert_eq!(garden.tile(pos).and_then(Tile::plant), Some(id));
        assert_eq!(garden.plant_at(pos).map(Plant::position), Some(pos));
        assert_eq!(garden.plant_count(), 1);
        assert!(garden.is_consistent());
    }

    #[test]
    fn test_plant_seed_rejections() {
        let mut garden = garden();
        let mut rng = never();
        assert_eq!(
            garden.plant_seed(TilePos::new(99, 0), PlantKind::Carrot, &mut rng),
            Err(ActionRejected::OutOfBounds(TilePos::new(99, 0)))
        );
        assert_eq!(
            garden.plant_seed(TilePos::new(0, 0), PlantKind::Carrot, &mut rng),
            Err(ActionRejected::UnplantableSoil(TilePos::new(0, 0)))
        );
        let pos = TilePos::new(9, 6);
        assert!(garden.plant_seed(pos, PlantKind::Corn, &mut rng).is_ok());
        assert_eq!(
            garden.plant_seed(pos, PlantKind::Carrot, &mut rng),
            Err(ActionRejected::Occupied(pos))
        );
        assert_eq!(garden.plant_count(), 1);
    }

    #[test]
    fn test_poor_soil_penalty() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden.set_soil_quality(pos, 0.3).expect("in bounds");
        // Force the early-growth mutation so there is progress to penalise.
        let mut rng = ScriptedRandom::new([0.0], 0.99);
        garden
            .plant_seed(pos, PlantKind::Carrot, &mut rng)
            .expect("planted");
        let plant = garden.plant_at(pos).expect("plant");
        assert!((plant.growth_progress() - 0.24).abs() < 1e-6);
    }

    #[test]
    fn test_water_and_fertilize_buffers() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden
            .plant_seed(pos, PlantKind::Carrot, &mut never())
            .expect("planted");

        assert!(garden.water_plant(pos).is_ok());
        assert_eq!(garden.tile(pos).map(|t| t.water_level), Some(3));
        assert!(garden.water_plant(pos).is_ok());
        assert_eq!(
            garden.water_plant(pos),
            Err(ActionRejected::WaterFull(pos))
        );
        assert_eq!(garden.tile(pos).map(|t| t.water_level), Some(4));

        assert!(garden.fertilize_plant(pos).is_ok());
        assert_eq!(
            garden.fertilize_plant(pos),
            Err(ActionRejected::AlreadyFertilized(pos))
        );
        assert_eq!(garden.tile(pos).map(|t| t.fertilizer_level), Some(1));

        let empty = TilePos::new(9, 7);
        assert_eq!(garden.water_plant(empty), Err(ActionRejected::NoPlant(empty)));
    }

    #[test]
    fn test_tile_buffers_are_capped() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden
            .plant_seed(pos, PlantKind::Corn, &mut never())
            .expect("planted");
        for _ in 0..4 {
            garden.water_plant(pos).expect("watered");
        }
        assert_eq!(garden.plant_at(pos).map(Plant::water_level), Some(4));
        assert_eq!(garden.tile(pos).map(|t| t.water_level), Some(MAX_TILE_WATER));

        let dry = TilePos::new(9, 6);
        garden.apply_rain();
        assert_eq!(garden.tile(dry).map(|t| t.water_level), Some(4));
        garden.apply_rain();
        assert_eq!(garden.tile(dry).map(|t| t.water_level), Some(MAX_TILE_WATER));
        assert_eq!(garden.tile(pos).map(|t| t.water_level), Some(MAX_TILE_WATER));

        for _ in 0..4 {
            garden.fertilize_plant(pos).expect("fertilized");
            assert!(garden.remove_plant(pos).is_some());
            garden
                .plant_seed(pos, PlantKind::Corn, &mut never())
                .expect("replanted");
        }
        assert_eq!(
            garden.tile(pos).map(|t| t.fertilizer_level),
            Some(MAX_TILE_FERTILIZER)
        );
    }

    #[test]
    fn test_remove_plant_improves_soil() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        for _ in 0..8 {
            garden
                .plant_seed(pos, PlantKind::Carrot, &mut never())
                .expect("planted");
            assert!(garden.remove_plant(pos).is_some());
            assert!(garden.is_consistent());
        }
        let quality = garden.tile(pos).map(|t| t.soil_quality).expect("tile");
        assert!((quality - MAX_SOIL_QUALITY).abs() < 1e-6);
        assert!(garden.remove_plant(pos).is_none());
        assert_eq!(garden.plant_count(), 0);
    }

    #[test]
    fn test_expand() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden
            .plant_seed(pos, PlantKind::Carrot, &mut never())
            .expect("planted");
        garden.remove_plant(pos);
        let boosted = garden.tile(pos).map(|t| t.soil_quality).expect("tile");

        assert!(garden.expand().is_ok());
        assert_eq!(garden.expansions(), 2);
        // 9x9 square around the centre.
        assert_eq!(garden.plantable_count(), 81);
        let unlocked = garden.tile(TilePos::new(6, 3)).expect("tile");
        assert!((unlocked.soil_quality - 0.8).abs() < f32::EPSILON);
        assert_eq!(unlocked.water_level, 1);
        // Already-plantable tiles keep their quality.
        let kept = garden.tile(pos).map(|t| t.soil_quality).expect("tile");
        assert!((kept - boosted).abs() < f32::EPSILON);

        assert!(garden.expand().is_ok());
        assert_eq!(
            garden.expand(),
            Err(ActionRejected::ExpansionLimit { max: 3 })
        );
        assert_eq!(garden.expansions(), 3);
    }

    #[test]
    fn test_rain() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden
            .plant_seed(pos, PlantKind::Carrot, &mut never())
            .expect("planted");

        garden.apply_rain();
        assert!(garden.is_raining());
        assert_eq!(garden.plant_at(pos).map(Plant::water_level), Some(1));
        assert_eq!(garden.tile(pos).map(|t| t.water_level), Some(4));
        assert_eq!(garden.tile(TilePos::new(0, 0)).map(|t| t.water_level), Some(0));

        let events = garden.update(19.0, &mut never());
        assert!(!events.contains(&GardenEvent::RainEnded));
        let events = garden.update(1.0, &mut never());
        assert!(events.contains(&GardenEvent::RainEnded));
        assert!(!garden.is_raining());
    }

    #[test]
    fn test_pest_infestation_destroys_all_when_few() {
        let mut garden = garden();
        let mut rng = SeededRandom::with_seed(11);
        garden
            .plant_seed(TilePos::new(9, 7), PlantKind::Carrot, &mut rng)
            .expect("planted");
        garden
            .plant_seed(TilePos::new(11, 7), PlantKind::Tomato, &mut rng)
            .expect("planted");

        let destroyed = garden.trigger_pest_infestation(&mut rng).expect("triggered");
        assert_eq!(destroyed.len(), 2);
        assert_eq!(garden.plant_count(), 0);
        assert!(garden.pest_active());
        assert!(garden.is_consistent());

        garden
            .plant_seed(TilePos::new(9, 7), PlantKind::Carrot, &mut rng)
            .expect("planted");
        assert!(garden.trigger_pest_infestation(&mut rng).is_none());
        assert_eq!(garden.plant_count(), 1);
    }

    #[test]
    fn test_pest_infestation_caps_at_three() {
        let mut garden = garden();
        let mut rng = SeededRandom::with_seed(5);
        for x in 8..13 {
            garden
                .plant_seed(TilePos::new(x, 7), PlantKind::Carrot, &mut rng)
                .expect("planted");
        }
        let destroyed = garden.trigger_pest_infestation(&mut rng).expect("triggered");
        assert_eq!(destroyed.len(), 3);
        assert_eq!(garden.plant_count(), 2);
        assert!(destroyed.iter().all(|&p| garden.plant_at(p).is_none()));
    }

    #[test]
    fn test_pest_window_expires() {
        let mut garden = garden();
        let mut rng = never();
        assert_eq!(garden.trigger_pest_infestation(&mut rng), Some(Vec::new()));
        garden.update(29.0, &mut rng);
        assert!(garden.pest_active());
        let events = garden.update(1.0, &mut rng);
        assert!(events.contains(&GardenEvent::PestsCleared));
        assert!(!garden.pest_active());
        assert!(garden.trigger_pest_infestation(&mut rng).is_some());
    }

    #[test]
    fn test_update_reports_stage_advances() {
        let mut garden = garden();
        let pos = TilePos::new(10, 7);
        garden
            .plant_seed(pos, PlantKind::Carrot, &mut never())
            .expect("planted");
        let events = garden.update(100.0, &mut never());
        assert_eq!(
            events,
            vec![GardenEvent::StageAdvanced {
                pos,
                kind: PlantKind::Carrot,
                stage: GrowthStage::Sprout,
            }]
        );
    }
}
