use wass_core::Arbitrary;
use wass_core::Mass;
use wass_transport::Support;

/// An ordered collection of weighted particles.
///
/// Particle `k` carries `weight(k) >= 0` at `position(k)`. Implementations
/// are read-only views: the engine never mutates an event, and the
/// orchestrator shares preprocessed events across worker threads.
pub trait Event: Clone + Send + Sync {
    /// Particle position type.
    type P: Support;
    /// Number of particles.
    fn size(&self) -> usize;
    /// Weight of particle `k`.
    fn weight(&self, k: usize) -> Mass;
    /// Position of particle `k`.
    fn position(&self, k: usize) -> &Self::P;
    /// Sum of all weights.
    fn total(&self) -> Mass {
        (0..self.size()).map(|k| self.weight(k)).sum()
    }
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// An event that owns its weights and positions in two parallel vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorEvent<P> {
    weights: Vec<Mass>,
    positions: Vec<P>,
}

impl<P> Default for VectorEvent<P> {
    fn default() -> Self {
        Self {
            weights: Vec::new(),
            positions: Vec::new(),
        }
    }
}

impl<P: Support> VectorEvent<P> {
    pub fn new(weights: Vec<Mass>, positions: Vec<P>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            weights.len() == positions.len(),
            "event has {} weights but {} positions",
            weights.len(),
            positions.len()
        );
        Ok(Self { weights, positions })
    }
    pub fn push(&mut self, weight: Mass, position: P) {
        self.weights.push(weight);
        self.positions.push(position);
    }
    pub fn weights(&self) -> &[Mass] {
        &self.weights
    }
    pub fn positions(&self) -> &[P] {
        &self.positions
    }
    pub fn positions_mut(&mut self) -> &mut [P] {
        &mut self.positions
    }
    pub fn into_parts(self) -> (Vec<Mass>, Vec<P>) {
        (self.weights, self.positions)
    }
}

impl VectorEvent<usize> {
    /// Weights over index particles `0..n`, for use with precomputed ground distances.
    pub fn indexed(weights: Vec<Mass>) -> Self {
        let positions = (0..weights.len()).collect();
        Self { weights, positions }
    }
    /// `n` index particles of unit weight.
    pub fn uniform(n: usize) -> Self {
        Self::indexed(vec![1.; n])
    }
}

impl<P: Support + Arbitrary> VectorEvent<P> {
    /// `n` random particles with weights uniform on (0, 1].
    pub fn random(n: usize) -> Self {
        (0..n)
            .map(|_| (1. - rand::random::<Mass>(), P::random()))
            .collect()
    }
}

impl<P> FromIterator<(Mass, P)> for VectorEvent<P> {
    fn from_iter<I: IntoIterator<Item = (Mass, P)>>(iter: I) -> Self {
        let (weights, positions) = iter.into_iter().unzip();
        Self { weights, positions }
    }
}

impl<P: Support + Send + Sync> Event for VectorEvent<P> {
    type P = P;
    fn size(&self) -> usize {
        self.weights.len()
    }
    fn weight(&self, k: usize) -> Mass {
        self.weights[k]
    }
    fn position(&self, k: usize) -> &P {
        &self.positions[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Euclidean2;

    #[test]
    fn does_reject_ragged_event() {
        assert!(VectorEvent::new(vec![1., 2.], vec![0usize]).is_err());
        assert!(VectorEvent::new(vec![1., 2.], vec![0usize, 1]).is_ok());
    }
    #[test]
    fn is_total_sum_of_weights() {
        let event = VectorEvent::indexed(vec![0.5, 1.5, 2.]);
        assert_eq!(event.size(), 3);
        assert_eq!(event.total(), 4.);
        assert_eq!(*event.position(2), 2);
    }
    #[test]
    fn is_random_event_positive() {
        let event = VectorEvent::<Euclidean2>::random(32);
        assert_eq!(event.size(), 32);
        assert!(event.weights().iter().all(|w| *w > 0. && *w <= 1.));
    }
}
