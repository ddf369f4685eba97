//! Simulation clock and host command surface.
//!
//! [`Simulation`] owns the garden, the economy and the only random source.
//! One [`Simulation::tick`] advances every engine by the same `dt`, then
//! runs the weather and day timers:
//!
//! - Every weather interval (30 s) the weather is re-rolled
//! - Every day (300 s) prices drift, then rain, boom and pest rolls happen
//!
//! Host commands return [`ActionResult`]; a rejection leaves all state as it
//! was.

use seedbed_common::{
    ActionRejected, ActionResult, PlantId, RandomSource, SeededRandom, TilePos,
};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::economy::{EconomyEngine, MarketEvent};
use crate::events::{EventBus, SimEvent};
use crate::garden::{GardenEvent, GardenGrid};
use crate::snapshot::{
    GardenSummary, PlantStatus, SimulationSnapshot, SimulationStats, TileSnapshot,
};
use crate::species::PlantKind;
use crate::weather::Weather;

/// A running garden simulation.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    garden: GardenGrid,
    economy: EconomyEngine,
    weather: Weather,
    day: u32,
    elapsed: f64,
    day_timer: f32,
    weather_timer: f32,
    stats: SimulationStats,
    rng: Box<dyn RandomSource>,
    events: EventBus,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    /// Create a simulation, seeding its random source from the config.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SeededRandom::with_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        Self::with_random(config, Box::new(rng))
    }

    /// Create a simulation drawing from the given random source.
    #[must_use]
    pub fn with_random(mut config: SimulationConfig, rng: Box<dyn RandomSource>) -> Self {
        config.validate();
        info!(
            "Starting garden {}x{} with {} money",
            config.garden.width, config.garden.height, config.economy.starting_money
        );
        Self {
            garden: GardenGrid::new(&config.garden),
            economy: EconomyEngine::new(&config.economy),
            config,
            weather: Weather::default(),
            day: 1,
            elapsed: 0.0,
            day_timer: 0.0,
            weather_timer: 0.0,
            stats: SimulationStats::default(),
            rng,
            events: EventBus::default(),
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += f64::from(dt);
        self.day_timer += dt;
        self.weather_timer += dt;

        for event in self.garden.update(dt, self.rng.as_mut()) {
            self.forward_garden_event(event);
        }
        for event in self.economy.update(dt) {
            self.forward_market_event(event);
        }

        if self.weather_timer >= self.config.clock.weather_interval {
            self.weather_timer = 0.0;
            self.roll_weather();
        }

        if self.day_timer >= self.config.clock.day_length {
            self.day_timer = 0.0;
            self.start_new_day();
        }
    }

    fn forward_garden_event(&mut self, event: GardenEvent) {
        match event {
            GardenEvent::StageAdvanced { pos, kind, stage } => {
                self.events
                    .publish(SimEvent::StageAdvanced { pos, kind, stage });
            },
            GardenEvent::Mutated { pos, mutation } => {
                self.events.publish(SimEvent::PlantMutated { pos, mutation });
            },
            GardenEvent::RainEnded => debug!("Rain stopped"),
            GardenEvent::PestsCleared => debug!("Pests cleared"),
        }
    }

    fn forward_market_event(&mut self, event: MarketEvent) {
        let event = match event {
            MarketEvent::Ended(kind) => SimEvent::MarketEventEnded { kind },
            MarketEvent::MilestoneReached(milestone) => SimEvent::MilestoneReached {
                threshold: milestone.threshold,
                name: milestone.name.to_string(),
            },
        };
        self.events.publish(event);
    }

    fn roll_weather(&mut self) {
        let next = Weather::roll(self.rng.as_mut());
        if next != self.weather {
            info!(
                "Weather changed: {} -> {}",
                self.weather.display_name(),
                next.display_name()
            );
            self.events.publish(SimEvent::WeatherChanged {
                from: self.weather,
                to: next,
            });
            self.weather = next;
        }
    }

    fn start_new_day(&mut self) {
        self.day += 1;
        info!("Day {} begins", self.day);
        self.events.publish(SimEvent::DayStarted { day: self.day });

        self.economy.update_market_prices(self.rng.as_mut());

        let clock = &self.config.clock;
        let (rain_chance, boom_chance, pest_chance) = (
            clock.rain_event_chance,
            clock.market_boom_chance,
            clock.pest_chance,
        );

        if self.weather.is_rainy() && self.rng.chance(rain_chance) {
            self.trigger_rain();
        }
        if self.rng.chance(boom_chance) {
            self.trigger_market_boom();
        }
        if self.rng.chance(pest_chance) {
            self.trigger_pest_infestation();
        }
    }

    /// Plant a seed.
    pub fn plant_seed(&mut self, pos: TilePos, kind: PlantKind) -> ActionResult<PlantId> {
        self.garden.plant_seed(pos, kind, self.rng.as_mut())
    }

    /// Plant a seed by species name; unknown names plant the default species.
    pub fn plant_seed_named(&mut self, pos: TilePos, name: &str) -> ActionResult<PlantId> {
        self.plant_seed(pos, PlantKind::parse_or_default(name))
    }

    /// Water the plant on a tile.
    pub fn water_plant(&mut self, pos: TilePos) -> ActionResult<()> {
        self.garden.water_plant(pos)
    }

    /// Fertilize the plant on a tile.
    pub fn fertilize_plant(&mut self, pos: TilePos) -> ActionResult<()> {
        self.garden.fertilize_plant(pos)
    }

    /// Harvest a ripe plant, selling it at the current market value.
    ///
    /// Returns the money earned.
    pub fn harvest_plant(&mut self, pos: TilePos) -> ActionResult<u64> {
        if !self.garden.contains(pos) {
            return Err(ActionRejected::OutOfBounds(pos));
        }
        let plant = self
            .garden
            .plant_at(pos)
            .ok_or(ActionRejected::NoPlant(pos))?;
        if !plant.is_harvestable() {
            return Err(ActionRejected::NotHarvestable(pos));
        }

        let value = self.economy.calculate_value(plant);
        let kind = plant.kind();
        let mutated = plant.is_mutated();

        self.economy.add_money(value);
        self.garden.remove_plant(pos);

        self.stats.plants_harvested += 1;
        self.stats.harvest_earnings += value;
        if mutated {
            self.stats.mutated_harvested += 1;
        }

        info!("Harvested {} at {pos} for {value}", kind.name());
        self.events.publish(SimEvent::PlantHarvested {
            pos,
            kind,
            value,
            mutated,
        });
        Ok(value)
    }

    /// Buy a garden expansion.
    ///
    /// Nothing is spent when the garden is already fully expanded.
    pub fn purchase_expansion(&mut self) -> ActionResult<()> {
        if !self.garden.can_expand() {
            return Err(ActionRejected::ExpansionLimit {
                max: self.garden.max_expansions(),
            });
        }
        self.economy.spend_money(self.config.expansion_cost)?;
        self.garden.expand()
    }

    /// Rain on the garden now.
    pub fn trigger_rain(&mut self) {
        self.garden.apply_rain();
        self.events.publish(SimEvent::RainStarted);
    }

    /// Start a pest infestation now.
    ///
    /// Returns the destroyed plant positions, or `None` if one is active.
    pub fn trigger_pest_infestation(&mut self) -> Option<Vec<TilePos>> {
        let destroyed = self.garden.trigger_pest_infestation(self.rng.as_mut())?;
        self.events.publish(SimEvent::PestInfestation {
            destroyed: destroyed.clone(),
        });
        Some(destroyed)
    }

    /// Start a market boom now. Returns `false` if one is active.
    pub fn trigger_market_boom(&mut self) -> bool {
        let started = self.economy.trigger_market_boom();
        if started {
            self.events.publish(SimEvent::MarketBoomStarted);
        }
        started
    }

    /// Start a market crash now. Returns `false` if one is active.
    pub fn trigger_market_crash(&mut self) -> bool {
        let started = self.economy.trigger_market_crash();
        if started {
            self.events.publish(SimEvent::MarketCrashStarted);
        }
        started
    }

    /// Override the current weather.
    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    /// The garden.
    #[must_use]
    pub fn garden(&self) -> &GardenGrid {
        &self.garden
    }

    /// The economy.
    #[must_use]
    pub fn economy(&self) -> &EconomyEngine {
        &self.economy
    }

    /// Current weather.
    #[must_use]
    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// Current day, starting at 1.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Seconds simulated so far.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Harvest statistics.
    #[must_use]
    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Capture a read-only view of the whole simulation.
    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            day: self.day,
            elapsed: self.elapsed,
            weather: self.weather,
            garden: GardenSummary::new(&self.garden),
            tiles: self
                .garden
                .tiles()
                .map(|(pos, tile)| TileSnapshot::new(pos, tile))
                .collect(),
            plants: self
                .garden
                .plants()
                .map(|(id, plant)| PlantStatus::new(id, plant, self.economy.calculate_value(plant)))
                .collect(),
            economy: self.economy.summary(),
            stats: self.stats,
        }
    }
}
