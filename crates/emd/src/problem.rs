use super::event::Event;
use super::extra::ExtraParticle;
use super::params::Params;
use wass_core::Mass;
use wass_transport::Measure;
use wass_transport::Network;
use wass_transport::Status;

/// A transportation problem between two events, laid out as a flow network.
///
/// Supply nodes come first, one per particle of the first event, followed
/// by the synthetic particle when it sits on that side. Demand nodes follow
/// in the same pattern for the second event. There is one arc per
/// (supply, demand) pair, numbered row-major: arc `i * cols + j`.
///
/// Weights are divided by the larger event total before they reach the
/// network, which keeps supplies near unit scale whatever the input units.
/// Multiply the solver's objective by [`Problem::scale`] to undo this.
#[derive(Debug, Default, Clone)]
pub struct Problem {
    network: Network,
    wa: Vec<Mass>,
    wb: Vec<Mass>,
    rows: usize,
    cols: usize,
    extra: ExtraParticle,
    scale: Mass,
}

impl Problem {
    /// Rebuilds the network for `a` against `b`, reusing buffers.
    ///
    /// Fails before any solving on empty events, invalid weights, or an
    /// imbalance the configured policy does not permit.
    pub fn build<M, A, B>(&mut self, params: &Params, measure: &M, a: &A, b: &B) -> Result<(), Status>
    where
        M: Measure,
        A: Event<P = M::X>,
        B: Event<P = M::Y>,
    {
        self.network.clear();
        self.extra = ExtraParticle::Neither;
        self.rows = 0;
        self.cols = 0;
        self.scale = 1.;
        if a.is_empty() || b.is_empty() {
            return Err(Status::Empty);
        }
        self.wa.clear();
        self.wa.extend((0..a.size()).map(|k| a.weight(k)));
        self.wb.clear();
        self.wb.extend((0..b.size()).map(|k| b.weight(k)));
        if self.wa.iter().chain(self.wb.iter()).any(|w| !w.is_finite() || *w < 0.) {
            return Err(Status::Infeasible);
        }
        let mut ta = self.wa.iter().sum::<Mass>();
        let mut tb = self.wb.iter().sum::<Mass>();
        if params.norm {
            if ta == 0. || tb == 0. {
                return Err(Status::Empty);
            }
            self.wa.iter_mut().for_each(|w| *w /= ta);
            self.wb.iter_mut().for_each(|w| *w /= tb);
            ta = 1.;
            tb = 1.;
        } else {
            let tolerance = params.epsilon_large_factor * Mass::EPSILON * ta.max(tb);
            if (ta - tb).abs() > tolerance {
                if !params.extra.allows_imbalance() {
                    return Err(Status::SupplyMismatch);
                }
                self.extra = if ta < tb {
                    ExtraParticle::Zero
                } else {
                    ExtraParticle::One
                };
            } else if tb > 0. && ta != tb {
                let ratio = ta / tb;
                self.wb.iter_mut().for_each(|w| *w *= ratio);
                tb = ta;
            }
        }
        let total = ta.max(tb);
        if total > 0. {
            self.scale = total;
        }
        let scale = self.scale;
        let surplus = (ta - tb).abs() / scale;
        self.layout(params, measure, a, b, surplus);
        Ok(())
    }

    fn layout<M, A, B>(&mut self, params: &Params, measure: &M, a: &A, b: &B, surplus: Mass)
    where
        M: Measure,
        A: Event<P = M::X>,
        B: Event<P = M::Y>,
    {
        let (na, nb) = (a.size(), b.size());
        self.rows = na + (self.extra == ExtraParticle::Zero) as usize;
        self.cols = nb + (self.extra == ExtraParticle::One) as usize;
        for w in self.wa.iter() {
            self.network.node(w / self.scale);
        }
        if self.extra == ExtraParticle::Zero {
            self.network.node(surplus);
        }
        for w in self.wb.iter() {
            self.network.node(-w / self.scale);
        }
        if self.extra == ExtraParticle::One {
            self.network.node(-surplus);
        }
        for i in 0..self.rows {
            for j in 0..self.cols {
                let cost = if i < na && j < nb {
                    params.cost(measure.distance(a.position(i), b.position(j)))
                } else {
                    params.extra_cost
                };
                self.network.arc(i, self.rows + j, cost);
            }
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }
    /// Supply nodes, including the synthetic particle if on the first side.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Demand nodes, including the synthetic particle if on the second side.
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Side that received the synthetic particle in the last build.
    pub fn extra(&self) -> ExtraParticle {
        self.extra
    }
    /// Factor that maps solver mass back to input units.
    pub fn scale(&self) -> Mass {
        self.scale
    }
}
