use super::network::Network;
use super::status::Status;
use wass_core::Energy;
use wass_core::Mass;

/// Iteration cap and tolerance factors for one solve.
///
/// Tolerances are relative: each factor multiplies `f64::EPSILON` and the
/// magnitude of the problem it guards (total supply for flow comparisons,
/// the artificial big-M cost for reduced-cost comparisons).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Maximum number of pivots before giving up.
    pub iterations: usize,
    /// Scales the flow tolerance (supply balance, leftover artificial flow).
    pub epsilon_large_factor: f64,
    /// Scales the optimality tolerance on reduced costs.
    pub epsilon_small_factor: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            iterations: wass_core::EMD_ITERATIONS,
            epsilon_large_factor: wass_core::EMD_EPSILON_LARGE_FACTOR,
            epsilon_small_factor: wass_core::EMD_EPSILON_SMALL_FACTOR,
        }
    }
}

/// A min-cost-flow solver.
///
/// Implementations own all of their scratch state, so one instance per
/// thread is enough to solve any number of networks without sharing.
pub trait Solver: Default + Send {
    /// Solves `network` and reports how it went.
    /// Flows, cost and potentials are only meaningful after [`Status::Success`].
    fn solve(&mut self, network: &Network, limits: &Limits) -> Status;
    /// Optimal flow on every arc of the last solved network.
    fn flows(&self) -> &[Mass];
    /// Node potentials (dual values) of the last solved network.
    fn potentials(&self) -> &[Energy];
    /// Total cost of the last solution.
    fn cost(&self) -> Energy;
    /// Pivots performed during the last solve.
    fn iterations(&self) -> usize;
}
