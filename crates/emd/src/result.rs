use super::extra::ExtraParticle;
use std::time::Duration;
use wass_core::Energy;
use wass_core::Mass;
use wass_transport::Coupling;
use wass_transport::Status;

/// The optimal transport plan of one EMD computation, in input units.
///
/// A dense `rows × cols` matrix that includes the synthetic particle's row
/// or column when one was used.
#[derive(Debug, Clone, PartialEq)]
pub struct Flows {
    rows: usize,
    cols: usize,
    flows: Vec<Mass>,
    cost: Energy,
}

impl Flows {
    pub(crate) fn new(rows: usize, cols: usize, flows: Vec<Mass>, cost: Energy) -> Self {
        debug_assert_eq!(flows.len(), rows * cols);
        Self {
            rows,
            cols,
            flows,
            cost,
        }
    }
    /// Row-major flow matrix.
    pub fn as_slice(&self) -> &[Mass] {
        &self.flows
    }
}

impl Coupling for Flows {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn flow(&self, i: usize, j: usize) -> Mass {
        self.flows[i * self.cols + j]
    }
    fn cost(&self) -> Energy {
        self.cost
    }
}

/// Outcome of one EMD computation.
///
/// The distance is only readable when the status is [`Status::Success`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmdResult {
    status: Status,
    distance: Energy,
    extra: ExtraParticle,
    iterations: usize,
    flows: Option<Flows>,
    duration: Option<Duration>,
}

impl EmdResult {
    pub(crate) fn failure(
        status: Status,
        extra: ExtraParticle,
        iterations: usize,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            status,
            distance: Energy::NAN,
            extra,
            iterations,
            flows: None,
            duration,
        }
    }
    pub(crate) fn success(
        distance: Energy,
        extra: ExtraParticle,
        iterations: usize,
        flows: Option<Flows>,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            status: Status::Success,
            distance,
            extra,
            iterations,
            flows,
            duration,
        }
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
    /// The EMD, if the computation succeeded.
    pub fn distance(&self) -> Option<Energy> {
        self.status.is_success().then_some(self.distance)
    }
    pub fn into_result(self) -> Result<Energy, Status> {
        self.status.check().map(|_| self.distance)
    }
    /// Side that received the synthetic particle, if any.
    pub fn extra(&self) -> ExtraParticle {
        self.extra
    }
    /// Solver pivots.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn flows(&self) -> Option<&Flows> {
        self.flows.as_ref()
    }
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
