use wass_core::Energy;
use wass_core::Mass;

/// A solved transport plan (coupling) between two weighted point sets.
///
/// Rows index source particles and columns index target particles, each
/// including the synthetic extra particle when one was needed to balance
/// total mass. The marginals of the plan equal the two events' weights.
pub trait Coupling {
    /// Number of source particles in the plan.
    fn rows(&self) -> usize;
    /// Number of target particles in the plan.
    fn cols(&self) -> usize;
    /// Returns the mass transported from source `i` to target `j`.
    fn flow(&self, i: usize, j: usize) -> Mass;
    /// Returns the total transport cost of this plan.
    fn cost(&self) -> Energy;
    /// Total mass leaving source `i`.
    fn outflow(&self, i: usize) -> Mass {
        (0..self.cols()).map(|j| self.flow(i, j)).sum()
    }
    /// Total mass arriving at target `j`.
    fn inflow(&self, j: usize) -> Mass {
        (0..self.rows()).map(|i| self.flow(i, j)).sum()
    }
    /// Total mass moved by the plan.
    fn moved(&self) -> Mass {
        (0..self.rows()).map(|i| self.outflow(i)).sum()
    }
}
