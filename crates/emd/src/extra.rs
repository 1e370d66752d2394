use serde::Deserialize;
use serde::Serialize;

/// Policy for events of unequal total weight, and the side that received
/// the synthetic particle once a problem is built.
///
/// As a policy, `Neither` forbids imbalance while `Zero` and `One` permit
/// it. Either permissive value places the synthetic particle in whichever
/// event is lighter, and the result reports the side it actually went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtraParticle {
    #[default]
    Neither,
    /// Synthetic particle belongs to the first event.
    Zero,
    /// Synthetic particle belongs to the second event.
    One,
}

impl ExtraParticle {
    pub fn allows_imbalance(&self) -> bool {
        !matches!(self, ExtraParticle::Neither)
    }
}

impl std::fmt::Display for ExtraParticle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExtraParticle::Neither => write!(f, "neither"),
            ExtraParticle::Zero => write!(f, "zero"),
            ExtraParticle::One => write!(f, "one"),
        }
    }
}
