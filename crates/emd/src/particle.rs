use serde::Deserialize;
use serde::Serialize;
use wass_core::Arbitrary;
use wass_core::Energy;
use wass_transport::Support;

/// Azimuthal period.
pub const TWOPI: Energy = 2. * std::f64::consts::PI;

/// A point in D-dimensional Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euclidean<const D: usize>([Energy; D]);

pub type Euclidean2 = Euclidean<2>;
pub type Euclidean3 = Euclidean<3>;

impl<const D: usize> Euclidean<D> {
    pub const fn origin() -> Self {
        Self([0.; D])
    }
    pub fn coords(&self) -> &[Energy; D] {
        &self.0
    }
    /// Translates this point by `-by`.
    pub fn shifted(&self, by: &[Energy; D]) -> Self {
        Self(std::array::from_fn(|k| self.0[k] - by[k]))
    }
}

impl<const D: usize> Default for Euclidean<D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<const D: usize> From<[Energy; D]> for Euclidean<D> {
    fn from(coords: [Energy; D]) -> Self {
        Self(coords)
    }
}

impl<const D: usize> Support for Euclidean<D> {}

impl<const D: usize> Arbitrary for Euclidean<D> {
    /// Uniform on the unit hypercube.
    fn random() -> Self {
        Self(std::array::from_fn(|_| rand::random::<Energy>()))
    }
}

/// A particle direction in rapidity–azimuth coordinates.
///
/// Azimuth is periodic with period 2π, so two particles on either side of
/// the branch cut are close. [`YPhiDistance`] accounts for this.
///
/// [`YPhiDistance`]: crate::YPhiDistance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YPhi {
    y: Energy,
    phi: Energy,
}

impl YPhi {
    pub fn new(y: Energy, phi: Energy) -> Self {
        Self { y, phi }
    }
    pub fn y(&self) -> Energy {
        self.y
    }
    pub fn phi(&self) -> Energy {
        self.phi
    }
}

impl From<(Energy, Energy)> for YPhi {
    fn from((y, phi): (Energy, Energy)) -> Self {
        Self::new(y, phi)
    }
}

impl Support for YPhi {}

impl Arbitrary for YPhi {
    /// Rapidity uniform on [-1, 1), azimuth uniform on [0, 2π).
    fn random() -> Self {
        Self::new(
            2. * rand::random::<Energy>() - 1.,
            TWOPI * rand::random::<Energy>(),
        )
    }
}

/// Folds an azimuthal difference into [-π, π].
pub fn wrap(dphi: Energy) -> Energy {
    let dphi = dphi.rem_euclid(TWOPI);
    if dphi > std::f64::consts::PI {
        dphi - TWOPI
    } else {
        dphi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn does_wrap_into_principal_range() {
        assert!((wrap(0.5) - 0.5).abs() < 1e-12);
        assert!((wrap(TWOPI - 0.5) + 0.5).abs() < 1e-12);
        assert!((wrap(-TWOPI + 0.5) - 0.5).abs() < 1e-12);
        assert!(wrap(3. * PI).abs() <= PI + 1e-12);
    }
    #[test]
    fn is_random_euclidean_in_unit_cube() {
        (0..64)
            .map(|_| Euclidean3::random())
            .flat_map(|p| *p.coords())
            .for_each(|x| assert!((0. ..1.).contains(&x)));
    }
    #[test]
    fn does_shift_componentwise() {
        let p = Euclidean2::from([1., 2.]).shifted(&[0.5, 3.]);
        assert_eq!(p.coords(), &[0.5, -1.]);
    }
}
