use super::handler::Handler;
use super::handler::Triple;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Mutex;
use wass_core::Energy;
use wass_core::Mass;

/// Spacing of histogram bin edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binning {
    /// Equal widths in x.
    Linear,
    /// Equal widths in ln x. Requires a positive lower edge.
    Log,
}

impl Binning {
    fn forward(&self, x: Energy) -> Energy {
        match self {
            Binning::Linear => x,
            Binning::Log => x.ln(),
        }
    }
    fn inverse(&self, t: Energy) -> Energy {
        match self {
            Binning::Linear => t,
            Binning::Log => t.exp(),
        }
    }
}

/// Accumulated bin contents. Index 0 is underflow, `nbins + 1` is overflow.
#[derive(Debug, Clone, Default, PartialEq)]
struct Bins {
    sums: Vec<Mass>,
    squares: Vec<Mass>,
    count: usize,
}

/// Histogram of EMD values, optionally weighted per pair.
///
/// Each absorbed `(i, j, d)` adds weight `w_a[i] · w_b[j]` (1 when no
/// weights are configured) to the bin containing `d`. Values below the
/// range go to underflow, values at or above it to overflow. NaNs are
/// counted but binned nowhere.
#[derive(Debug)]
pub struct Histogram1D {
    binning: Binning,
    nbins: usize,
    lo: Energy,
    hi: Energy,
    weights: Option<(Vec<Mass>, Vec<Mass>)>,
    bins: Mutex<Bins>,
}

impl Histogram1D {
    pub fn new(nbins: usize, lo: Energy, hi: Energy, binning: Binning) -> anyhow::Result<Self> {
        anyhow::ensure!(nbins > 0, "histogram needs at least one bin");
        anyhow::ensure!(
            lo.is_finite() && hi.is_finite() && lo < hi,
            "invalid histogram range [{}, {})",
            lo,
            hi
        );
        anyhow::ensure!(
            binning == Binning::Linear || lo > 0.,
            "log binning needs a positive lower edge, got {}",
            lo
        );
        Ok(Self {
            binning,
            nbins,
            lo,
            hi,
            weights: None,
            bins: Mutex::new(Bins {
                sums: vec![0.; nbins + 2],
                squares: vec![0.; nbins + 2],
                count: 0,
            }),
        })
    }
    pub fn linear(nbins: usize, lo: Energy, hi: Energy) -> anyhow::Result<Self> {
        Self::new(nbins, lo, hi, Binning::Linear)
    }
    pub fn log(nbins: usize, lo: Energy, hi: Energy) -> anyhow::Result<Self> {
        Self::new(nbins, lo, hi, Binning::Log)
    }
    /// Weights each pair by the product of its events' weights.
    /// In symmetric mode pass the same weights twice.
    pub fn with_weights(mut self, a: Vec<Mass>, b: Vec<Mass>) -> Self {
        self.weights = Some((a, b));
        self
    }

    pub fn nbins(&self) -> usize {
        self.nbins
    }
    pub fn binning(&self) -> Binning {
        self.binning
    }
    /// `nbins + 1` edges from `lo` to `hi`.
    pub fn bin_edges(&self) -> Vec<Energy> {
        let (t0, t1) = (self.binning.forward(self.lo), self.binning.forward(self.hi));
        let step = (t1 - t0) / self.nbins as Energy;
        (0..=self.nbins)
            .map(|k| self.binning.inverse(t0 + step * k as Energy))
            .collect()
    }
    /// Arithmetic (linear) or geometric (log) bin midpoints.
    pub fn bin_centers(&self) -> Vec<Energy> {
        self.bin_edges()
            .windows(2)
            .map(|e| match self.binning {
                Binning::Linear => (e[0] + e[1]) / 2.,
                Binning::Log => (e[0] * e[1]).sqrt(),
            })
            .collect()
    }
    /// Summed weight per bin, excluding under- and overflow.
    pub fn hist(&self) -> Vec<Mass> {
        self.read(|bins| bins.sums[1..=self.nbins].to_vec())
    }
    /// Statistical uncertainty per bin: square root of summed squared weights.
    pub fn errs(&self) -> Vec<Mass> {
        self.read(|bins| bins.squares[1..=self.nbins].iter().map(|s| s.sqrt()).collect())
    }
    pub fn underflow(&self) -> Mass {
        self.read(|bins| bins.sums[0])
    }
    pub fn overflow(&self) -> Mass {
        self.read(|bins| bins.sums[self.nbins + 1])
    }
    /// Number of values absorbed.
    pub fn count(&self) -> usize {
        self.read(|bins| bins.count)
    }
    /// Adds another histogram's contents into this one. Binnings must match.
    pub fn merge(&self, other: &Self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.binning == other.binning
                && self.nbins == other.nbins
                && self.lo == other.lo
                && self.hi == other.hi,
            "cannot merge histograms with different binning"
        );
        let theirs = other.read(Bins::clone);
        let mut mine = self.lock();
        let mine = &mut *mine;
        mine.sums
            .iter_mut()
            .zip(theirs.sums.iter())
            .for_each(|(a, b)| *a += b);
        mine.squares
            .iter_mut()
            .zip(theirs.squares.iter())
            .for_each(|(a, b)| *a += b);
        mine.count += theirs.count;
        Ok(())
    }

    /// Bin index of `x`, or None for NaN.
    fn bin(&self, x: Energy) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        if x < self.lo {
            return Some(0);
        }
        if x >= self.hi {
            return Some(self.nbins + 1);
        }
        let (t0, t1) = (self.binning.forward(self.lo), self.binning.forward(self.hi));
        let t = self.binning.forward(x);
        let k = ((t - t0) / (t1 - t0) * self.nbins as Energy) as usize;
        Some(k.min(self.nbins - 1) + 1)
    }
    fn weight(&self, i: usize, j: usize) -> Mass {
        match self.weights {
            None => 1.,
            Some((ref a, ref b)) => {
                debug_assert!(i < a.len() && j < b.len(), "pair ({}, {}) has no weight", i, j);
                a.get(i).copied().unwrap_or(1.) * b.get(j).copied().unwrap_or(1.)
            }
        }
    }
    fn lock(&self) -> std::sync::MutexGuard<'_, Bins> {
        self.bins.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
    fn read<T>(&self, f: impl FnOnce(&Bins) -> T) -> T {
        f(&self.lock())
    }
}

impl Handler for Histogram1D {
    fn description(&self) -> String {
        format!(
            "Histogram1D {:?} {} bins over [{}, {})",
            self.binning, self.nbins, self.lo, self.hi
        )
    }
    fn begin(&self, n_a: usize, n_b: usize) -> anyhow::Result<()> {
        if let Some((ref a, ref b)) = self.weights {
            anyhow::ensure!(
                a.len() == n_a && b.len() == n_b,
                "histogram weights cover {} x {} events, run has {} x {}",
                a.len(),
                b.len(),
                n_a,
                n_b
            );
        }
        Ok(())
    }
    fn absorb(&self, triples: &[Triple]) {
        let binned = triples
            .iter()
            .map(|&(i, j, d)| (self.bin(d), self.weight(i, j)))
            .collect::<Vec<_>>();
        let mut bins = self.lock();
        let bins = &mut *bins;
        bins.count += binned.len();
        for (k, w) in binned {
            if let Some(k) = k {
                bins.sums[k] += w;
                bins.squares[k] += w * w;
            }
        }
    }
}
