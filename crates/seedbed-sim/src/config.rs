//! Simulation configuration.
//!
//! Provides tunable parameters for the garden, economy and clock.
//! Configuration can be loaded from and saved to a TOML file.

use seedbed_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Garden grid parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Side length of the plantable starter plot at the grid centre
    pub starter_plot_size: u32,
    /// Water buffer of starter plot tiles
    pub starter_water: u8,
    /// Maximum number of expansions (the starter plot counts as one)
    pub max_expansions: u32,
    /// Soil quality of tiles outside the starter plot (0 = unplantable)
    pub outer_soil_quality: f32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            starter_plot_size: 5,
            starter_water: 2,
            max_expansions: 3,
            outer_soil_quality: 0.0,
        }
    }
}

/// Economy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Money at the start of a game
    pub starting_money: u64,
    /// Entries kept per species in the price history
    pub price_history_length: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            price_history_length: 10,
        }
    }
}

/// Clock and random event parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Seconds between weather rolls
    pub weather_interval: f32,
    /// Seconds per simulated day
    pub day_length: f32,
    /// Daily chance of a rain event while it is rainy
    pub rain_event_chance: f64,
    /// Daily chance of a market boom
    pub market_boom_chance: f64,
    /// Daily chance of a pest infestation
    pub pest_chance: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            weather_interval: 30.0,
            day_length: 300.0,
            rain_event_chance: 0.3,
            market_boom_chance: 0.1,
            pest_chance: 0.05,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed (None = seeded from entropy)
    pub seed: Option<u64>,
    /// Cost of a garden expansion
    pub expansion_cost: u64,
    /// Garden settings
    pub garden: GardenConfig,
    /// Economy settings
    pub economy: EconomyConfig,
    /// Clock settings
    pub clock: ClockConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            expansion_cost: DEFAULT_EXPANSION_COST,
            garden: GardenConfig::default(),
            economy: EconomyConfig::default(),
            clock: ClockConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        config.validate();
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Save configuration to a TOML file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        let garden = &mut self.garden;
        garden.width = garden.width.clamp(1, MAX_GRID_SIDE);
        garden.height = garden.height.clamp(1, MAX_GRID_SIDE);
        garden.starter_plot_size = garden
            .starter_plot_size
            .clamp(1, garden.width.min(garden.height));
        garden.starter_water = garden.starter_water.min(5);
        garden.max_expansions = garden.max_expansions.max(1);
        garden.outer_soil_quality = garden.outer_soil_quality.clamp(0.0, 1.5);

        self.economy.price_history_length = self.economy.price_history_length.max(1);

        let clock = &mut self.clock;
        clock.weather_interval = clock.weather_interval.max(1.0);
        clock.day_length = clock.day_length.max(1.0);
        clock.rain_event_chance = clock.rain_event_chance.clamp(0.0, 1.0);
        clock.market_boom_chance = clock.market_boom_chance.clamp(0.0, 1.0);
        clock.pest_chance = clock.pest_chance.clamp(0.0, 1.0);
    }
}

/// Largest garden width or height.
pub const MAX_GRID_SIDE: u32 = 512;

/// Default cost of a garden expansion.
pub const DEFAULT_EXPANSION_COST: u64 = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::seeded(7);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.expansion_cost, 200);
        assert_eq!(config.garden.width, 20);
        assert_eq!(config.garden.height, 15);
        assert_eq!(config.economy.starting_money, 100);
        assert!((config.clock.day_length - 300.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_toml() {
        let config = SimulationConfig::from_toml_str(
            r"
            seed = 99

            [garden]
            width = 8
            height = 6

            [clock]
            pest_chance = 4.0
            ",
        )
        .expect("valid toml");

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.garden.width, 8);
        assert_eq!(config.garden.starter_plot_size, 5);
        assert_eq!(config.economy.price_history_length, 10);
        assert_eq!(config.expansion_cost, 200);
        assert!((config.clock.pest_chance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_toml() {
        let result = SimulationConfig::from_toml_str("seed = \"abc\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("seedbed.toml");

        let mut config = SimulationConfig::seeded(3);
        config.garden.max_expansions = 5;
        config.save_to(&path).expect("save");

        let loaded = SimulationConfig::load_from(&path).expect("load");
        assert_eq!(loaded.seed, Some(3));
        assert_eq!(loaded.garden.max_expansions, 5);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SimulationConfig::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.seed, None);
        assert_eq!(config.expansion_cost, 200);
    }
}
