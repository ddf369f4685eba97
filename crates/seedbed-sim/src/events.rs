//! Event bus for host feedback.

use crossbeam_channel::{bounded, Receiver, Sender};
use seedbed_common::TilePos;
use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;
use crate::plant::{GrowthStage, Mutation};
use crate::species::PlantKind;
use crate::weather::Weather;

/// Events published by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Plant entered a new growth stage
    StageAdvanced {
        /// Plant tile
        pos: TilePos,
        /// Plant kind
        kind: PlantKind,
        /// Stage entered
        stage: GrowthStage,
    },
    /// Plant mutated while growing
    PlantMutated {
        /// Plant tile
        pos: TilePos,
        /// Mutation applied
        mutation: Mutation,
    },
    /// Plant harvested and sold
    PlantHarvested {
        /// Plant tile
        pos: TilePos,
        /// Plant kind
        kind: PlantKind,
        /// Money earned
        value: u64,
        /// Whether the plant was mutated
        mutated: bool,
    },
    /// Weather re-rolled to a different state
    WeatherChanged {
        /// Previous weather
        from: Weather,
        /// New weather
        to: Weather,
    },
    /// A new day began
    DayStarted {
        /// Day number
        day: u32,
    },
    /// Rain watered the garden
    RainStarted,
    /// Pests destroyed plants
    PestInfestation {
        /// Tiles whose plants were destroyed
        destroyed: Vec<TilePos>,
    },
    /// Market boom began
    MarketBoomStarted,
    /// Market crash began
    MarketCrashStarted,
    /// Market boom or crash window ended
    MarketEventEnded {
        /// Which event ended
        kind: EffectKind,
    },
    /// Earnings milestone reached
    MilestoneReached {
        /// Earnings threshold
        threshold: u64,
        /// Milestone title
        name: String,
    },
}

/// Event bus collecting simulation events until the host drains them.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<SimEvent>,
    receiver: Receiver<SimEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            capacity: capacity.max(1),
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: SimEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<SimEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<SimEvent> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        bus.publish(SimEvent::DayStarted { day: 2 });
        bus.sender().send(SimEvent::RainStarted).expect("send");
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![SimEvent::DayStarted { day: 2 }, SimEvent::RainStarted]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_events() {
        let bus = EventBus::new(1);
        bus.publish(SimEvent::RainStarted);
        bus.publish(SimEvent::MarketBoomStarted);
        assert_eq!(bus.drain(), vec![SimEvent::RainStarted]);
    }
}
