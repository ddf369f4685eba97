//! Garden weather.
//!
//! Weather is re-rolled on a fixed interval by cumulative sampling over
//! [`Weather::ROLL_TABLE`]. It has no direct effect on growth; rainy weather
//! only enables the daily rain event.

use seedbed_common::RandomSource;
use serde::{Deserialize, Serialize};

/// Weather states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Clear skies.
    #[default]
    Sunny,
    /// Overcast.
    Cloudy,
    /// Raining; daily rain events can fire.
    Rainy,
}

impl Weather {
    /// Roll weights, in sampling order.
    pub const ROLL_TABLE: [(Self, f64); 3] =
        [(Self::Sunny, 0.6), (Self::Cloudy, 0.25), (Self::Rainy, 0.15)];

    /// Get the weather identifier.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
        }
    }

    /// Get the display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
        }
    }

    /// Check if it is raining.
    #[must_use]
    pub fn is_rainy(self) -> bool {
        matches!(self, Self::Rainy)
    }

    /// Pick a weather state from one uniform draw.
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        let mut cumulative = 0.0;
        for (weather, weight) in Self::ROLL_TABLE {
            cumulative += weight;
            if roll <= cumulative {
                return weather;
            }
        }
        Self::Sunny
    }

    /// Roll a new weather state.
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        Self::from_roll(rng.next_f64())
    }
}
