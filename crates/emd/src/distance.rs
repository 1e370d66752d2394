use super::particle::Euclidean;
use super::particle::YPhi;
use super::particle::wrap;
use std::sync::Arc;
use wass_core::Energy;
use wass_transport::Measure;

/// Straight-line distance between two [`Euclidean`] points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanDistance<const D: usize>;

pub type EuclideanDistance2 = EuclideanDistance<2>;
pub type EuclideanDistance3 = EuclideanDistance<3>;

impl<const D: usize> Measure for EuclideanDistance<D> {
    type X = Euclidean<D>;
    type Y = Euclidean<D>;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        x.coords()
            .iter()
            .zip(y.coords().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<Energy>()
            .sqrt()
    }
}

/// Euclidean distance in the (y, φ) plane with φ taken modulo 2π.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YPhiDistance;

impl Measure for YPhiDistance {
    type X = YPhi;
    type Y = YPhi;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        let dy = x.y() - y.y();
        let dphi = wrap(x.phi() - y.phi());
        (dy * dy + dphi * dphi).sqrt()
    }
}

/// Ground distances supplied up front as a dense row-major matrix.
///
/// Particles are plain indices: source particle `i` and target particle
/// `j` are `rows × cols` apart by `dists[i * cols + j]`. This is how an
/// EMD between collections of events is computed once the pairwise EMDs
/// between their members are known. The matrix is shared, so cloning the
/// measure into every worker costs a reference count.
#[derive(Debug, Clone, PartialEq)]
pub struct Precomputed {
    rows: usize,
    cols: usize,
    dists: Arc<[Energy]>,
}

impl Precomputed {
    pub fn new(rows: usize, cols: usize, dists: Vec<Energy>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            dists.len() == rows * cols,
            "expected {}x{} = {} ground distances, got {}",
            rows,
            cols,
            rows * cols,
            dists.len()
        );
        if let Some(d) = dists.iter().find(|d| !d.is_finite() || **d < 0.) {
            anyhow::bail!("ground distance {} is not finite and non-negative", d);
        }
        Ok(Self {
            rows,
            cols,
            dists: Arc::from(dists),
        })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl Measure for Precomputed {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        debug_assert!(*x < self.rows && *y < self.cols, "index out of range");
        self.dists[x * self.cols + y]
    }
}
