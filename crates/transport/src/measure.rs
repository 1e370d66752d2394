use super::support::Support;
use wass_core::Energy;

/// Ground metric between elements of two support spaces.
///
/// Defines the distance between a particle in the source event and a
/// particle in the target event. The EMD engine raises this distance to the
/// configured exponent and divides by the configured scale to obtain the
/// cost of moving one unit of mass.
///
/// # Contract
///
/// - `distance(x, y) >= 0`
/// - symmetric and zero on equal positions when `X == Y`
///
/// Neither property is enforced, but the metric interpretation of the
/// resulting EMD depends on both.
///
/// # Type Parameters
///
/// - `X` — Source support space
/// - `Y` — Target support space
///
/// While `X` and `Y` are usually the same type, the trait supports
/// heterogeneous problems where source and target live in different spaces.
pub trait Measure {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the ground distance between `x` and `y`.
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy;
}
