use serde::Deserialize;
use serde::Serialize;

/// How a pairwise run is scheduled and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Batch {
    /// Worker threads. Zero uses every logical CPU.
    pub n_jobs: usize,
    /// Stop starting new pairs after the first failure and report it.
    pub halt: bool,
    /// Pairs per unit of work handed to a worker.
    pub chunk: usize,
    /// Progress log lines over the run. Zero disables progress logging.
    pub progress: usize,
    /// In symmetric mode, store a full `n × n` matrix instead of the
    /// condensed triangle.
    pub symmetric: bool,
}

impl Default for Batch {
    fn default() -> Self {
        Self {
            n_jobs: 0,
            halt: false,
            chunk: wass_core::PAIRWISE_CHUNK,
            progress: wass_core::PAIRWISE_PROGRESS_STEPS,
            symmetric: false,
        }
    }
}

impl Batch {
    /// Resolved worker thread count.
    pub fn threads(&self) -> usize {
        match self.n_jobs {
            0 => num_cpus::get(),
            n => n,
        }
    }
}
