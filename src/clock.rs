//! Fixed-step clock for variable-rate host loops
//!
//! Accumulates real elapsed time and runs whole simulation ticks out of it.
//! Lives outside `sim` so the step itself never sees wall-clock time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{World, tick};

#[derive(Debug, Clone)]
pub struct FixedClock {
    accumulator: f32,
    max_substeps: u32,
    /// Total ticks run through this clock
    pub ticks: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(MAX_SUBSTEPS)
    }
}

impl FixedClock {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
            ticks: 0,
        }
    }

    /// Time banked toward the next tick
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed `elapsed` seconds of real time and run the ticks it pays for
    ///
    /// At most `max_substeps` ticks run per call; time beyond that is
    /// dropped so a stalled host can't fall into a catch-up spiral. Returns
    /// the number of ticks run.
    pub fn advance(&mut self, world: &mut World, elapsed: f32) -> u32 {
        if !elapsed.is_finite() || elapsed < 0.0 {
            log::debug!("Ignoring bad frame time {}", elapsed);
            return 0;
        }
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            tick(world);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if self.accumulator >= SIM_DT {
            log::debug!(
                "Frame overran {} substeps, dropping {:.4}s",
                self.max_substeps,
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        self.ticks += u64::from(substeps);
        substeps
    }
}
