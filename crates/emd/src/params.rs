use super::extra::ExtraParticle;
use serde::Deserialize;
use serde::Serialize;
use wass_core::Energy;
use wass_transport::Limits;

/// Configuration of one EMD engine.
///
/// Missing fields deserialize to their defaults, so a JSON config only
/// needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Ground distance scale.
    pub r: Energy,
    /// Ground distance exponent.
    pub beta: Energy,
    /// Normalize both events to unit total weight before solving.
    pub norm: bool,
    /// Imbalance policy when `norm` is off.
    pub extra: ExtraParticle,
    /// Cost per unit of mass sent to or from the synthetic particle.
    pub extra_cost: Energy,
    /// Pivot cap for the solver.
    pub n_iter_max: usize,
    /// Scales the tolerance on supply balance.
    pub epsilon_large_factor: f64,
    /// Scales the tolerance on reduced-cost optimality.
    pub epsilon_small_factor: f64,
    /// Record wall-clock time of each computation.
    pub do_timing: bool,
    /// Keep the optimal flow matrix on each result.
    pub flows: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            r: wass_core::EMD_R,
            beta: wass_core::EMD_BETA,
            norm: false,
            extra: ExtraParticle::default(),
            extra_cost: wass_core::EMD_EXTRA_COST,
            n_iter_max: wass_core::EMD_ITERATIONS,
            epsilon_large_factor: wass_core::EMD_EPSILON_LARGE_FACTOR,
            epsilon_small_factor: wass_core::EMD_EPSILON_SMALL_FACTOR,
            do_timing: false,
            flows: false,
        }
    }
}

/// (R, β, norm), the parameters most callers set.
impl From<(Energy, Energy, bool)> for Params {
    fn from((r, beta, norm): (Energy, Energy, bool)) -> Self {
        Self {
            r,
            beta,
            norm,
            ..Self::default()
        }
    }
}

impl Params {
    /// Rejects parameters that cannot produce a meaningful distance.
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.r.is_finite() && self.r > 0., "R must be positive, got {}", self.r);
        anyhow::ensure!(
            self.beta.is_finite() && self.beta > 0.,
            "beta must be positive, got {}",
            self.beta
        );
        anyhow::ensure!(
            self.extra_cost.is_finite() && self.extra_cost >= 0.,
            "extra_cost must be non-negative, got {}",
            self.extra_cost
        );
        anyhow::ensure!(
            self.epsilon_large_factor > 0. && self.epsilon_small_factor > 0.,
            "epsilon factors must be positive"
        );
        Ok(())
    }
    /// Solver limits carried by these parameters.
    pub fn limits(&self) -> Limits {
        Limits {
            iterations: self.n_iter_max,
            epsilon_large_factor: self.epsilon_large_factor,
            epsilon_small_factor: self.epsilon_small_factor,
        }
    }
    /// Transport cost per unit mass at ground distance `d`: (d / R)^β.
    pub fn cost(&self, d: Energy) -> Energy {
        let x = d / self.r;
        if self.beta == 1. { x } else { x.powf(self.beta) }
    }
    /// One line per parameter, aligned for logging.
    pub fn description(&self) -> String {
        [
            format!("{:<24}{}", "R", self.r),
            format!("{:<24}{}", "beta", self.beta),
            format!("{:<24}{}", "norm", self.norm),
            format!("{:<24}{}", "extra", self.extra),
            format!("{:<24}{}", "extra_cost", self.extra_cost),
            format!("{:<24}{}", "n_iter_max", self.n_iter_max),
            format!("{:<24}{}", "epsilon_large_factor", self.epsilon_large_factor),
            format!("{:<24}{}", "epsilon_small_factor", self.epsilon_small_factor),
            format!("{:<24}{}", "do_timing", self.do_timing),
        ]
        .join("\n")
    }
}
