use super::event::Event;
use super::event::VectorEvent;
use super::particle::Euclidean;
use super::particle::YPhi;
use super::particle::wrap;

/// An event-to-event transform applied once per event before any pairing.
///
/// Preprocessors run concurrently on different events, hence `Send + Sync`.
/// A list of them composes left to right.
pub trait Preprocessor<E>: Send + Sync {
    fn description(&self) -> String;
    fn apply(&self, event: E) -> E;
}

/// Translates an event so that its weighted centroid sits at the origin.
///
/// Events of zero total weight are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterWeightedCentroid;

impl<const D: usize> Preprocessor<VectorEvent<Euclidean<D>>> for CenterWeightedCentroid {
    fn description(&self) -> String {
        String::from("CenterWeightedCentroid")
    }
    fn apply(&self, mut event: VectorEvent<Euclidean<D>>) -> VectorEvent<Euclidean<D>> {
        let total = event.total();
        if total <= 0. {
            return event;
        }
        let mut centroid = [0.; D];
        for (w, p) in event.weights().iter().zip(event.positions()) {
            for (c, x) in centroid.iter_mut().zip(p.coords()) {
                *c += w * x / total;
            }
        }
        event
            .positions_mut()
            .iter_mut()
            .for_each(|p| *p = p.shifted(&centroid));
        event
    }
}

/// Azimuths are unrolled around the first particle before averaging, so a
/// cluster straddling φ = 0 centers correctly. Centered azimuths are folded
/// back into [-π, π].
impl Preprocessor<VectorEvent<YPhi>> for CenterWeightedCentroid {
    fn description(&self) -> String {
        String::from("CenterWeightedCentroid")
    }
    fn apply(&self, mut event: VectorEvent<YPhi>) -> VectorEvent<YPhi> {
        let total = event.total();
        if total <= 0. {
            return event;
        }
        let anchor = event.position(0).phi();
        let (y, phi) = event
            .weights()
            .iter()
            .zip(event.positions())
            .map(|(w, p)| (w * p.y(), w * (anchor + wrap(p.phi() - anchor))))
            .fold((0., 0.), |(y, phi), (dy, dphi)| (y + dy, phi + dphi));
        let (y, phi) = (y / total, phi / total);
        event
            .positions_mut()
            .iter_mut()
            .for_each(|p| *p = YPhi::new(p.y() - y, wrap(p.phi() - phi)));
        event
    }
}
