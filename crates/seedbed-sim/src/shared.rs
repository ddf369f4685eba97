//! Thread-safe simulation handle.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::simulation::Simulation;
use crate::snapshot::SimulationSnapshot;

/// Cloneable handle serialising all access to one [`Simulation`].
///
/// The simulation is single-writer; hosts that tick from one thread and
/// issue commands from another share it through this handle.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    /// Wrap a simulation.
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    /// Lock the simulation.
    pub fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.lock()
    }

    /// Run a closure with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&self, dt: f32) {
        self.inner.lock().tick(dt);
    }

    /// Capture a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        self.inner.lock().snapshot()
    }
}
