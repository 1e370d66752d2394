use serde::Deserialize;
use serde::Serialize;

/// Outcome of a single transport computation.
///
/// Input-shape failures ([`Status::Empty`], [`Status::SupplyMismatch`]) are
/// detected before the solver runs. The remaining failures come out of the
/// pivot loop. A distance is only meaningful alongside [`Status::Success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum Status {
    #[error("EMDStatus - Success")]
    Success,
    #[error("EMDStatus - Empty")]
    Empty,
    #[error("EMDStatus - SupplyMismatch, consider increasing epsilon_large_factor")]
    SupplyMismatch,
    #[error("EMDStatus - Unbounded")]
    Unbounded,
    #[error("EMDStatus - MaxIterReached, consider increasing n_iter_max")]
    MaxIterReached,
    #[error("EMDStatus - Infeasible")]
    Infeasible,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
    /// Raise any non-success status as an error.
    pub fn check(self) -> Result<(), Status> {
        match self {
            Status::Success => Ok(()),
            status => Err(status),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Success
    }
}
