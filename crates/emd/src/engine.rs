use super::event::Event;
use super::params::Params;
use super::problem::Problem;
use super::result::EmdResult;
use super::result::Flows;
use wass_core::Energy;
use wass_transport::Measure;
use wass_transport::NetworkSimplex;
use wass_transport::Solver;
use wass_transport::Status;

/// Exact Earth Mover's Distance engine.
///
/// Owns a ground [`Measure`], a [`Params`] set, and one [`Solver`] whose
/// buffers are reused by every call to [`Emd::compute`]. An engine is not
/// shared between threads; parallel callers give each worker its own.
///
/// # Algorithm
///
/// 1. Validate weights and reconcile total mass (normalize, rescale, or
///    add the synthetic particle, per [`Params`])
/// 2. Lay out the bipartite network with arc cost `(d / R)^β`
/// 3. Solve min-cost flow exactly
/// 4. Scale the objective back to input units
pub struct Emd<M, S = NetworkSimplex>
where
    M: Measure,
    S: Solver,
{
    params: Params,
    measure: M,
    problem: Problem,
    solver: S,
}

impl<M, S> Emd<M, S>
where
    M: Measure,
    S: Solver,
{
    /// Validates `params` before building the engine.
    pub fn new(params: Params, measure: M) -> anyhow::Result<Self> {
        params.check()?;
        Ok(Self::from((params, measure)))
    }
    pub fn params(&self) -> &Params {
        &self.params
    }
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Computes the EMD between `a` and `b`. Neither event is modified.
    pub fn compute<A, B>(&mut self, a: &A, b: &B) -> EmdResult
    where
        A: Event<P = M::X>,
        B: Event<P = M::Y>,
    {
        let start = self.params.do_timing.then(std::time::Instant::now);
        let built = self.problem.build(&self.params, &self.measure, a, b);
        let status = match built {
            Err(status) => status,
            Ok(()) => self
                .solver
                .solve(self.problem.network(), &self.params.limits()),
        };
        let iterations = built.map(|_| self.solver.iterations()).unwrap_or(0);
        let duration = start.map(|t| t.elapsed());
        let extra = self.problem.extra();
        if !status.is_success() {
            log::debug!(
                "{:<32}{:<32}",
                "emd failed",
                format!("{:?} after {} pivots (extra {})", status, iterations, extra)
            );
            return EmdResult::failure(status, extra, iterations, duration);
        }
        let scale = self.problem.scale();
        let distance = self.solver.cost() * scale;
        let flows = self.params.flows.then(|| {
            Flows::new(
                self.problem.rows(),
                self.problem.cols(),
                self.solver.flows().iter().map(|f| f * scale).collect(),
                distance,
            )
        });
        EmdResult::success(distance, extra, iterations, flows, duration)
    }

    /// Computes the EMD and raises any failure as its [`Status`].
    pub fn emd<A, B>(&mut self, a: &A, b: &B) -> Result<Energy, Status>
    where
        A: Event<P = M::X>,
        B: Event<P = M::Y>,
    {
        self.compute(a, b).into_result()
    }

    pub fn description(&self) -> String {
        format!(
            "{:<24}{}\n{:<24}{}\n{}",
            "EMD",
            short(std::any::type_name::<M>()),
            "solver",
            short(std::any::type_name::<S>()),
            self.params.description()
        )
    }
}

/// Builds the engine without validating `params`.
impl<M, S> From<(Params, M)> for Emd<M, S>
where
    M: Measure,
    S: Solver,
{
    fn from((params, measure): (Params, M)) -> Self {
        Self {
            params,
            measure,
            problem: Problem::default(),
            solver: S::default(),
        }
    }
}

/// Last path segment of a type name.
fn short(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    let cut = base.rfind("::").map(|k| k + 2).unwrap_or(0);
    &name[cut..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Euclidean;
    use crate::Euclidean2;
    use crate::EuclideanDistance;
    use crate::EuclideanDistance2;
    use crate::ExtraParticle;
    use crate::Precomputed;
    use crate::VectorEvent;
    use wass_core::Mass;
    use wass_transport::Coupling;

    const TOLERANCE: Energy = 1e-9;

    fn engine(params: Params) -> Emd<EuclideanDistance2> {
        Emd::new(params, EuclideanDistance2::default()).unwrap()
    }
    fn event(particles: &[(Mass, [Energy; 2])]) -> VectorEvent<Euclidean2> {
        particles
            .iter()
            .map(|&(w, x)| (w, Euclidean2::from(x)))
            .collect()
    }
    fn normed() -> Params {
        Params::from((1., 1., true))
    }

    #[test]
    fn is_two_point_case_exact() {
        let a = event(&[(1., [0., 0.]), (1., [1., 0.])]);
        let b = event(&[(1., [0.5, 0.]), (1., [0.5, 0.])]);
        let d = engine(Params::default()).emd(&a, &b).unwrap();
        assert!((d - 1.).abs() < TOLERANCE, "{}", d);
    }
    #[test]
    fn is_self_distance_zero() {
        let ref mut emd = engine(normed());
        for _ in 0..8 {
            let a = VectorEvent::<Euclidean2>::random(12);
            let d = emd.emd(&a, &a).unwrap();
            assert!(d.abs() < TOLERANCE, "{}", d);
        }
    }
    #[test]
    fn is_emd_symmetric_and_positive() {
        let ref mut emd = engine(normed());
        for _ in 0..8 {
            let a = VectorEvent::<Euclidean2>::random(10);
            let b = VectorEvent::<Euclidean2>::random(13);
            let ab = emd.emd(&a, &b).unwrap();
            let ba = emd.emd(&b, &a).unwrap();
            assert!(ab >= 0.);
            assert!((ab - ba).abs() < TOLERANCE, "{} != {}", ab, ba);
        }
    }
    #[test]
    fn does_satisfy_triangle_inequality() {
        let ref mut emd = engine(normed());
        for _ in 0..8 {
            let a = VectorEvent::<Euclidean2>::random(8);
            let b = VectorEvent::<Euclidean2>::random(9);
            let c = VectorEvent::<Euclidean2>::random(7);
            let ac = emd.emd(&a, &c).unwrap();
            let ab = emd.emd(&a, &b).unwrap();
            let bc = emd.emd(&b, &c).unwrap();
            assert!(ac <= ab + bc + TOLERANCE, "{} > {} + {}", ac, ab, bc);
        }
    }
    #[test]
    fn does_match_one_dimensional_closed_form() {
        let ref mut emd = Emd::<EuclideanDistance<1>>::new(normed(), EuclideanDistance).unwrap();
        for _ in 0..8 {
            let a = VectorEvent::<Euclidean<1>>::random(15);
            let b = VectorEvent::<Euclidean<1>>::random(11);
            let d = emd.emd(&a, &b).unwrap();
            assert!((d - cdf_distance(&a, &b)).abs() < TOLERANCE);
        }
    }
    #[test]
    fn is_imbalance_without_extra_mismatch() {
        let a = event(&[(1., [0., 0.])]);
        let b = event(&[(2., [0., 0.])]);
        let result = engine(Params::default()).compute(&a, &b);
        assert_eq!(result.status(), Status::SupplyMismatch);
        assert_eq!(result.distance(), None);
    }
    #[test]
    fn is_extra_particle_costlier_than_rescaling() {
        let a = event(&[(1., [0., 0.])]);
        let b = event(&[(2., [0.5, 0.])]);
        let b_equal = event(&[(1., [0.5, 0.])]);
        for extra in [ExtraParticle::Zero, ExtraParticle::One] {
            let ref mut emd = engine(Params {
                extra,
                ..Params::default()
            });
            let result = emd.compute(&a, &b);
            assert_eq!(result.extra(), ExtraParticle::Zero);
            let d = result.distance().unwrap();
            let equal = emd.emd(&a, &b_equal).unwrap();
            assert!((d - 1.5).abs() < TOLERANCE, "{}", d);
            assert!(d > equal);
        }
    }
    #[test]
    fn is_free_vacuum_only_moving_lighter_mass() {
        let a = event(&[(1., [0., 0.])]);
        let b = event(&[(1., [0.5, 0.]), (1., [3., 0.])]);
        let result = engine(Params {
            extra: ExtraParticle::One,
            extra_cost: 0.,
            flows: true,
            ..Params::default()
        })
        .compute(&a, &b);
        assert_eq!(result.extra(), ExtraParticle::Zero);
        let d = result.distance().unwrap();
        assert!((d - 0.5).abs() < TOLERANCE, "{}", d);
        let flows = result.flows().unwrap();
        assert_eq!((flows.rows(), flows.cols()), (2, 2));
        assert!((flows.flow(0, 0) - 1.).abs() < TOLERANCE);
        assert!(flows.flow(0, 1).abs() < TOLERANCE);
        assert!((flows.outflow(1) - 1.).abs() < TOLERANCE);
        assert!((flows.flow(1, 1) - 1.).abs() < TOLERANCE);
    }
    #[test]
    fn is_empty_event_empty() {
        let a = event(&[(1., [0., 0.])]);
        let result = engine(Params::default()).compute(&a, &VectorEvent::<Euclidean2>::default());
        assert_eq!(result.status(), Status::Empty);
        assert_eq!(result.into_result(), Err(Status::Empty));
    }
    #[test]
    fn is_negative_weight_infeasible() {
        let a = event(&[(-1., [0., 0.]), (2., [1., 0.])]);
        let b = event(&[(1., [0., 0.])]);
        let result = engine(Params::default()).compute(&a, &b);
        assert_eq!(result.status(), Status::Infeasible);
    }
    #[test]
    fn does_stop_at_iteration_cap() {
        let a = event(&[(1., [0., 0.]), (1., [1., 0.]), (1., [2., 0.])]);
        let b = event(&[(1., [0., 1.]), (1., [1., 1.]), (1., [2., 1.])]);
        let result = engine(Params {
            n_iter_max: 1,
            ..Params::default()
        })
        .compute(&a, &b);
        assert_eq!(result.status(), Status::MaxIterReached);
        assert!(result.distance().is_none());
    }
    #[test]
    fn does_keep_flows_in_input_units() {
        let a = event(&[(2., [0., 0.]), (4., [1., 0.])]);
        let b = event(&[(3., [0., 1.]), (3., [1., 1.])]);
        let result = engine(Params {
            flows: true,
            do_timing: true,
            ..Params::default()
        })
        .compute(&a, &b);
        let flows = result.flows().unwrap();
        assert!(result.duration().is_some());
        assert_eq!((flows.rows(), flows.cols()), (2, 2));
        assert!((flows.outflow(0) - 2.).abs() < TOLERANCE);
        assert!((flows.outflow(1) - 4.).abs() < TOLERANCE);
        assert!((flows.inflow(0) - 3.).abs() < TOLERANCE);
        assert!((flows.moved() - 6.).abs() < TOLERANCE);
        assert!((flows.cost() - result.distance().unwrap()).abs() < TOLERANCE);
    }
    #[test]
    fn is_scale_invariant_under_norm() {
        let ref mut emd = engine(normed());
        let a = VectorEvent::<Euclidean2>::random(6);
        let b = VectorEvent::<Euclidean2>::random(6);
        let heavy = a
            .weights()
            .iter()
            .zip(a.positions())
            .map(|(w, p)| (w * 1e6, *p))
            .collect::<VectorEvent<_>>();
        let d = emd.emd(&a, &b).unwrap();
        let h = emd.emd(&heavy, &b).unwrap();
        assert!((d - h).abs() < TOLERANCE);
    }
    #[test]
    fn does_compare_event_sets_with_precomputed_distances() {
        // two sets of two events, where each event of A matches one of B
        let ground = Precomputed::new(2, 2, vec![0., 1., 1., 0.]).unwrap();
        let ref mut emd = Emd::<Precomputed>::new(normed(), ground).unwrap();
        let a = VectorEvent::uniform(2);
        let b = VectorEvent::uniform(2);
        assert!(emd.emd(&a, &b).unwrap().abs() < TOLERANCE);
        let skew = VectorEvent::indexed(vec![1., 0.]);
        assert!((emd.emd(&skew, &b).unwrap() - 0.5).abs() < TOLERANCE);
    }
    #[test]
    fn does_describe_engine() {
        let description = engine(Params::default()).description();
        assert!(description.contains("EuclideanDistance<2>"));
        assert!(description.contains("NetworkSimplex"));
        assert!(description.contains("beta"));
    }

    /// ∫ |F_A(x) − F_B(x)| dx over normalized 1-D events.
    fn cdf_distance(a: &VectorEvent<Euclidean<1>>, b: &VectorEvent<Euclidean<1>>) -> Energy {
        let (ta, tb) = (a.weights().iter().sum::<Mass>(), b.weights().iter().sum::<Mass>());
        let mut points = a
            .weights()
            .iter()
            .zip(a.positions())
            .map(|(w, p)| (p.coords()[0], w / ta))
            .chain(
                b.weights()
                    .iter()
                    .zip(b.positions())
                    .map(|(w, p)| (p.coords()[0], -w / tb)),
            )
            .collect::<Vec<_>>();
        points.sort_by(|x, y| x.0.total_cmp(&y.0));
        let mut cdf = 0.;
        let mut total = 0.;
        for w in points.windows(2) {
            cdf += w[0].1;
            total += cdf.abs() * (w[1].0 - w[0].0);
        }
        total
    }
}
