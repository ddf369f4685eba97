//! Plant species table.
//!
//! This module provides the static per-species growth parameters:
//! - Known plant kinds and their names
//! - Species definitions built with [`PlantDefinition::builder`]
//! - A lookup table that always resolves to some species
//!
//! Lookup policy: a kind without its own definition (strawberry, sunflower in
//! the default table) grows with the default species' parameters while
//! keeping its own kind for pricing. Unrecognised names parse to carrot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Known plant kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    /// Fast-growing basic vegetable.
    #[default]
    Carrot,
    /// Medium growth, good value.
    Tomato,
    /// Slow growth, high value.
    Corn,
    /// Rare fruit.
    Strawberry,
    /// Decorative flower.
    Sunflower,
}

impl PlantKind {
    /// Get the identifier used by hosts and price tables.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Carrot => "carrot",
            Self::Tomato => "tomato",
            Self::Corn => "corn",
            Self::Strawberry => "strawberry",
            Self::Sunflower => "sunflower",
        }
    }

    /// Parse a kind from its identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Parse a kind, resolving unknown names to the default (carrot).
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("Unknown plant type {name:?}, using {}", Self::default().name());
            Self::default()
        })
    }

    /// Get all plant kinds, in price-table order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Carrot,
            Self::Tomato,
            Self::Corn,
            Self::Strawberry,
            Self::Sunflower,
        ]
    }
}

/// Display color of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Creates a color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Orange.
    pub const ORANGE: Self = Self::new(255, 165, 0);
    /// Red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Green.
    pub const GREEN: Self = Self::new(34, 139, 34);
}

/// Definition of a plant species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDefinition {
    /// Kind this definition belongs to.
    pub kind: PlantKind,
    /// Display name.
    pub name: String,
    /// Seconds per growth stage at base rate.
    pub growth_time: f32,
    /// Water units the plant can hold (its maximum water level).
    pub water_need: u8,
    /// Base value before stage, mutation and care multipliers.
    pub base_value: u32,
    /// Base chance of a growth mutation per stage advance.
    pub mutation_chance: f64,
    /// Display color.
    pub color: Rgb,
}

impl PlantDefinition {
    /// Create a new plant definition builder.
    #[must_use]
    pub fn builder(kind: PlantKind, name: &str) -> PlantDefinitionBuilder {
        PlantDefinitionBuilder::new(kind, name)
    }
}

/// Builder for plant definitions.
#[derive(Debug)]
pub struct PlantDefinitionBuilder {
    def: PlantDefinition,
}

impl PlantDefinitionBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(kind: PlantKind, name: &str) -> Self {
        Self {
            def: PlantDefinition {
                kind,
                name: name.to_string(),
                growth_time: 10.0,
                water_need: 2,
                base_value: 20,
                mutation_chance: 0.05,
                color: Rgb::GREEN,
            },
        }
    }

    /// Set seconds per stage (clamped to a small positive minimum).
    #[must_use]
    pub fn growth_time(mut self, seconds: f32) -> Self {
        self.def.growth_time = seconds.max(0.01);
        self
    }

    /// Set the water capacity (at least 1).
    #[must_use]
    pub fn water_need(mut self, units: u8) -> Self {
        self.def.water_need = units.max(1);
        self
    }

    /// Set base value.
    #[must_use]
    pub fn base_value(mut self, value: u32) -> Self {
        self.def.base_value = value;
        self
    }

    /// Set base mutation chance.
    #[must_use]
    pub fn mutation_chance(mut self, chance: f64) -> Self {
        self.def.mutation_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set display color.
    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.def.color = color;
        self
    }

    /// Build the plant definition.
    #[must_use]
    pub fn build(self) -> PlantDefinition {
        self.def
    }
}

/// Species lookup table with a guaranteed fallback entry.
#[derive(Debug, Clone)]
pub struct SpeciesTable {
    definitions: HashMap<PlantKind, PlantDefinition>,
    fallback: PlantDefinition,
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SpeciesTable {
    /// Create a table holding only the fallback species.
    #[must_use]
    pub fn new(fallback: PlantDefinition) -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(fallback.kind, fallback.clone());
        Self {
            definitions,
            fallback,
        }
    }

    /// Create a table with the default species (carrot, tomato, corn).
    #[must_use]
    pub fn with_defaults() -> Self {
        let carrot = PlantDefinition::builder(PlantKind::Carrot, "Carrot")
            .growth_time(8.0)
            .water_need(2)
            .base_value(15)
            .mutation_chance(0.08)
            .color(Rgb::ORANGE)
            .build();

        let mut table = Self::new(carrot);

        table.register(
            PlantDefinition::builder(PlantKind::Tomato, "Tomato")
                .growth_time(12.0)
                .water_need(3)
                .base_value(25)
                .mutation_chance(0.06)
                .color(Rgb::RED)
                .build(),
        );

        table.register(
            PlantDefinition::builder(PlantKind::Corn, "Corn")
                .growth_time(15.0)
                .water_need(4)
                .base_value(35)
                .mutation_chance(0.04)
                .color(Rgb::YELLOW)
                .build(),
        );

        table
    }

    /// Register (or replace) a species definition.
    pub fn register(&mut self, definition: PlantDefinition) {
        if definition.kind == self.fallback.kind {
            self.fallback = definition.clone();
        }
        self.definitions.insert(definition.kind, definition);
    }

    /// Get the definition registered for a kind, if any.
    #[must_use]
    pub fn get(&self, kind: PlantKind) -> Option<&PlantDefinition> {
        self.definitions.get(&kind)
    }

    /// Resolve the growth parameters for a kind, falling back to the default species.
    #[must_use]
    pub fn resolve(&self, kind: PlantKind) -> &PlantDefinition {
        self.definitions.get(&kind).unwrap_or(&self.fallback)
    }

    /// The species used for kinds without their own definition.
    #[must_use]
    pub fn fallback(&self) -> &PlantDefinition {
        &self.fallback
    }
}
