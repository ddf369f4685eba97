//! Money, market prices and milestones.
//!
//! Prices follow a daily random walk around each species' base price. Market
//! booms and crashes rescale every current price for a limited time and also
//! scale harvest valuations; on expiry prices are recomputed from the walk.

use seedbed_common::{ActionRejected, ActionResult, RandomSource};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::info;

use crate::config::EconomyConfig;
use crate::effects::{ActiveEffects, EffectKind};
use crate::plant::Plant;
use crate::species::PlantKind;

/// Price used for kinds missing from the price table.
pub const DEFAULT_PLANT_PRICE: u64 = 20;

/// Base market prices.
pub const BASE_PRICES: [(PlantKind, u64); 5] = [
    (PlantKind::Carrot, 15),
    (PlantKind::Tomato, 25),
    (PlantKind::Corn, 35),
    (PlantKind::Strawberry, 50),
    (PlantKind::Sunflower, 40),
];

const MIN_PRICE_MULTIPLIER: f64 = 0.5;
const MAX_PRICE_MULTIPLIER: f64 = 2.0;
const DAILY_PRICE_DRIFT: f64 = 0.1;
const BOOM_FACTOR: f64 = 1.5;
const CRASH_FACTOR: f64 = 0.7;

/// An earnings milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Total earnings needed.
    pub threshold: u64,
    /// Milestone title.
    pub name: &'static str,
}

/// Milestones in ascending threshold order.
pub const MILESTONES: [Milestone; 6] = [
    Milestone {
        threshold: 100,
        name: "First Harvest",
    },
    Milestone {
        threshold: 500,
        name: "Small Farmer",
    },
    Milestone {
        threshold: 1000,
        name: "Established Gardener",
    },
    Milestone {
        threshold: 2500,
        name: "Plant Master",
    },
    Milestone {
        threshold: 5000,
        name: "Garden Empire",
    },
    Milestone {
        threshold: 10000,
        name: "Plant Legend",
    },
];

/// Direction of the last daily price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    /// Price went up.
    Rising,
    /// Price went down.
    Falling,
    /// Unchanged, or not enough history.
    Stable,
}

impl PriceTrend {
    /// Get the trend name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        }
    }
}

/// Market state of one species.
#[derive(Debug, Clone, Serialize)]
pub struct MarketPrice {
    /// Base price.
    pub base: u64,
    /// Random-walk multiplier, within [0.5, 2.0].
    pub multiplier: f64,
    /// Current price including any boom/crash rescale.
    pub current: u64,
    /// Recent daily prices, oldest first.
    pub history: VecDeque<u64>,
}

impl MarketPrice {
    fn new(base: u64) -> Self {
        Self {
            base,
            multiplier: 1.0,
            current: base,
            history: VecDeque::new(),
        }
    }

    fn walk_price(&self) -> u64 {
        (self.base as f64 * self.multiplier).round() as u64
    }
}

/// Notable changes produced by [`EconomyEngine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketEvent {
    /// A boom or crash window ended.
    Ended(EffectKind),
    /// Total earnings crossed a milestone.
    MilestoneReached(Milestone),
}

/// Market conditions overview.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    /// Current price per species.
    pub current_prices: BTreeMap<PlantKind, u64>,
    /// Base price per species.
    pub base_prices: BTreeMap<PlantKind, u64>,
    /// Random-walk multiplier per species.
    pub price_multipliers: BTreeMap<PlantKind, f64>,
    /// Boom active.
    pub market_boom: bool,
    /// Crash active.
    pub market_crash: bool,
    /// Seconds of boom left.
    pub boom_remaining: f32,
    /// Seconds of crash left.
    pub crash_remaining: f32,
}

/// Finances overview.
#[derive(Debug, Clone, Serialize)]
pub struct EconomySummary {
    /// Current balance.
    pub money: u64,
    /// Lifetime earnings.
    pub total_earned: u64,
    /// Lifetime spending.
    pub total_spent: u64,
    /// Thresholds of achieved milestones, ascending.
    pub achieved_milestones: Vec<u64>,
    /// Description of the next milestone.
    pub next_milestone: String,
    /// Market conditions.
    pub market: MarketSummary,
}

/// Money, prices and market events.
#[derive(Debug, Clone)]
pub struct EconomyEngine {
    money: u64,
    total_earned: u64,
    total_spent: u64,
    prices: BTreeMap<PlantKind, MarketPrice>,
    history_length: usize,
    effects: ActiveEffects,
    achieved: BTreeSet<u64>,
}

impl Default for EconomyEngine {
    fn default() -> Self {
        Self::new(&EconomyConfig::default())
    }
}

impl EconomyEngine {
    /// Create an economy with the starting balance and base prices.
    #[must_use]
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            money: config.starting_money,
            total_earned: 0,
            total_spent: 0,
            prices: BASE_PRICES
                .iter()
                .map(|&(kind, base)| (kind, MarketPrice::new(base)))
                .collect(),
            history_length: config.price_history_length.max(1),
            effects: ActiveEffects::new(),
            achieved: BTreeSet::new(),
        }
    }

    /// Current balance.
    #[must_use]
    pub fn money(&self) -> u64 {
        self.money
    }

    /// Lifetime earnings.
    #[must_use]
    pub fn total_earned(&self) -> u64 {
        self.total_earned
    }

    /// Lifetime spending.
    #[must_use]
    pub fn total_spent(&self) -> u64 {
        self.total_spent
    }

    /// Credit money.
    pub fn add_money(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }

    /// Debit money. Rejected without any change if the balance is too low.
    pub fn spend_money(&mut self, amount: u64) -> ActionResult<()> {
        if self.money < amount {
            return Err(ActionRejected::InsufficientFunds {
                needed: amount,
                have: self.money,
            });
        }
        self.money -= amount;
        self.total_spent = self.total_spent.saturating_add(amount);
        Ok(())
    }

    /// Check if the balance covers a cost.
    #[must_use]
    pub fn can_afford(&self, cost: u64) -> bool {
        self.money >= cost
    }

    /// Market state of a species.
    #[must_use]
    pub fn market_price(&self, kind: PlantKind) -> Option<&MarketPrice> {
        self.prices.get(&kind)
    }

    /// Current price of a species.
    #[must_use]
    pub fn current_price(&self, kind: PlantKind) -> u64 {
        self.prices
            .get(&kind)
            .map_or(DEFAULT_PLANT_PRICE, |price| price.current)
    }

    /// Check if a market boom is active.
    #[must_use]
    pub fn is_boom(&self) -> bool {
        self.effects.is_active(EffectKind::MarketBoom)
    }

    /// Check if a market crash is active.
    #[must_use]
    pub fn is_crash(&self) -> bool {
        self.effects.is_active(EffectKind::MarketCrash)
    }

    /// Sale value of a plant at current market conditions.
    ///
    /// Care bonus here is +0.2 fertilized and +0.1 at full water, smaller
    /// than the bonus in [`Plant::current_value`]. A boom takes precedence
    /// over a crash. Never less than 1.
    #[must_use]
    pub fn calculate_value(&self, plant: &Plant) -> u64 {
        let mut value = self.current_price(plant.kind()) as f64;
        value *= 1.0 + f64::from(plant.stage().index()) * 0.1;
        if plant.is_mutated() {
            value *= 2.0;
        }

        let mut care_bonus = 1.0;
        if plant.is_fertilized() {
            care_bonus += 0.2;
        }
        if plant.has_full_water() {
            care_bonus += 0.1;
        }
        value *= care_bonus;

        if self.is_boom() {
            value = (value * BOOM_FACTOR).floor();
        } else if self.is_crash() {
            value = (value * CRASH_FACTOR).floor();
        }

        (value.floor() as u64).max(1)
    }

    /// Daily random walk of every price.
    pub fn update_market_prices(&mut self, rng: &mut dyn RandomSource) {
        for price in self.prices.values_mut() {
            price.multiplier = (price.multiplier
                + rng.range_f64(-DAILY_PRICE_DRIFT, DAILY_PRICE_DRIFT))
            .clamp(MIN_PRICE_MULTIPLIER, MAX_PRICE_MULTIPLIER);
            price.current = price.walk_price();

            price.history.push_back(price.current);
            while price.history.len() > self.history_length {
                price.history.pop_front();
            }
        }
    }

    /// Start a market boom. Returns `false` if one is already active.
    pub fn trigger_market_boom(&mut self) -> bool {
        self.trigger(EffectKind::MarketBoom, BOOM_FACTOR)
    }

    /// Start a market crash. Returns `false` if one is already active.
    pub fn trigger_market_crash(&mut self) -> bool {
        self.trigger(EffectKind::MarketCrash, CRASH_FACTOR)
    }

    fn trigger(&mut self, kind: EffectKind, factor: f64) -> bool {
        if !self.effects.start(kind, kind.duration()) {
            return false;
        }
        for price in self.prices.values_mut() {
            price.current = (price.current as f64 * factor) as u64;
        }
        info!("{} started", kind.display_name());
        true
    }

    /// Advance market timers and record newly crossed milestones.
    pub fn update(&mut self, dt: f32) -> Vec<MarketEvent> {
        let mut events = Vec::new();

        for kind in self.effects.tick(dt) {
            for price in self.prices.values_mut() {
                price.current = price.walk_price();
            }
            info!("{} ended", kind.display_name());
            events.push(MarketEvent::Ended(kind));
        }

        for milestone in MILESTONES {
            if self.total_earned >= milestone.threshold && self.achieved.insert(milestone.threshold)
            {
                info!("Milestone reached: {}", milestone.name);
                events.push(MarketEvent::MilestoneReached(milestone));
            }
        }

        events
    }

    /// Thresholds of achieved milestones, ascending.
    pub fn achieved_milestones(&self) -> impl Iterator<Item = u64> + '_ {
        self.achieved.iter().copied()
    }

    /// Next unreached milestone and the earnings still needed.
    #[must_use]
    pub fn next_milestone(&self) -> Option<(Milestone, u64)> {
        MILESTONES
            .into_iter()
            .find(|m| m.threshold > self.total_earned)
            .map(|m| (m, m.threshold - self.total_earned))
    }

    /// Human-readable description of the next milestone.
    #[must_use]
    pub fn next_milestone_text(&self) -> String {
        match self.next_milestone() {
            Some((milestone, needed)) => format!("{} ({needed} more needed)", milestone.name),
            None => "All milestones achieved!".to_string(),
        }
    }

    /// Direction of the last daily change of a species' price.
    #[must_use]
    pub fn price_trend(&self, kind: PlantKind) -> PriceTrend {
        let Some(history) = self.prices.get(&kind).map(|p| &p.history) else {
            return PriceTrend::Stable;
        };
        let mut recent = history.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(last), Some(before)) if last > before => PriceTrend::Rising,
            (Some(last), Some(before)) if last < before => PriceTrend::Falling,
            _ => PriceTrend::Stable,
        }
    }

    /// Species whose current price is highest relative to its base price.
    #[must_use]
    pub fn best_investment(&self) -> PlantKind {
        let mut best = None;
        let mut best_ratio = 0.0;
        for (&kind, price) in &self.prices {
            let ratio = price.current as f64 / price.base.max(1) as f64;
            if ratio > best_ratio {
                best_ratio = ratio;
                best = Some(kind);
            }
        }
        best.unwrap_or_default()
    }

    /// Market conditions overview.
    #[must_use]
    pub fn market_summary(&self) -> MarketSummary {
        MarketSummary {
            current_prices: self.prices.iter().map(|(&k, p)| (k, p.current)).collect(),
            base_prices: self.prices.iter().map(|(&k, p)| (k, p.base)).collect(),
            price_multipliers: self.prices.iter().map(|(&k, p)| (k, p.multiplier)).collect(),
            market_boom: self.is_boom(),
            market_crash: self.is_crash(),
            boom_remaining: self
                .effects
                .remaining(EffectKind::MarketBoom)
                .unwrap_or(0.0),
            crash_remaining: self
                .effects
                .remaining(EffectKind::MarketCrash)
                .unwrap_or(0.0),
        }
    }

    /// Finances overview.
    #[must_use]
    pub fn summary(&self) -> EconomySummary {
        EconomySummary {
            money: self.money,
            total_earned: self.total_earned,
            total_spent: self.total_spent,
            achieved_milestones: self.achieved_milestones().collect(),
            next_milestone: self.next_milestone_text(),
            market: self.market_summary(),
        }
    }
}
