//! Timed one-shot effects.
//!
//! Rain, pest infestations and market booms/crashes all share the same shape:
//! a kind plus a remaining duration counted down every tick. Engines own an
//! [`ActiveEffects`] set and react to the kinds reported as expired.

use serde::{Deserialize, Serialize};

/// Kinds of timed effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Rain window after a rain event.
    Rain,
    /// Pest infestation window (blocks re-triggering).
    PestInfestation,
    /// Market boom.
    MarketBoom,
    /// Market crash.
    MarketCrash,
}

impl EffectKind {
    /// Default duration in seconds.
    #[must_use]
    pub fn duration(self) -> f32 {
        match self {
            Self::Rain => 20.0,
            Self::PestInfestation => 30.0,
            Self::MarketBoom => 60.0,
            Self::MarketCrash => 45.0,
        }
    }

    /// Get the display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rain => "Rain",
            Self::PestInfestation => "Pest Infestation",
            Self::MarketBoom => "Market Boom",
            Self::MarketCrash => "Market Crash",
        }
    }
}

/// An active effect and its remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    /// Effect kind.
    pub kind: EffectKind,
    /// Seconds until expiry.
    pub remaining: f32,
}

/// Set of active timed effects, at most one per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: Vec<TimedEffect>,
}

impl ActiveEffects {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect unless one of the same kind is already active.
    ///
    /// Returns `true` if the effect was started.
    pub fn start(&mut self, kind: EffectKind, duration: f32) -> bool {
        if self.is_active(kind) {
            return false;
        }
        self.effects.push(TimedEffect {
            kind,
            remaining: duration,
        });
        true
    }

    /// Start an effect, or reset its remaining time if already active.
    pub fn restart(&mut self, kind: EffectKind, duration: f32) {
        match self.effects.iter_mut().find(|e| e.kind == kind) {
            Some(effect) => effect.remaining = duration,
            None => self.effects.push(TimedEffect {
                kind,
                remaining: duration,
            }),
        }
    }

    /// Check if an effect kind is active.
    #[must_use]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remaining seconds for an active effect.
    #[must_use]
    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
    }

    /// Count every effect down by `dt`, removing and returning the expired kinds.
    pub fn tick(&mut self, dt: f32) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 {
                expired.push(effect.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Iterate over active effects.
    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    /// Check if no effect is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
