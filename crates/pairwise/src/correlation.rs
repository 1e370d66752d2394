use super::handler::Handler;
use super::handler::Triple;
use super::histogram::Histogram1D;
use wass_core::Energy;
use wass_core::Mass;

/// Correlation dimension of a dataset in EMD space.
///
/// Counts pairs closer than Q for log-spaced scales Q. The correlation
/// dimension at scale Q is the slope d ln C(Q) / d ln Q of that cumulative
/// count, estimated between consecutive bin edges.
#[derive(Debug)]
pub struct CorrelationDimension {
    hist: Histogram1D,
}

impl CorrelationDimension {
    pub fn new(nbins: usize, lo: Energy, hi: Energy) -> anyhow::Result<Self> {
        Ok(Self {
            hist: Histogram1D::log(nbins, lo, hi)?,
        })
    }
    pub fn histogram(&self) -> &Histogram1D {
        &self.hist
    }
    /// C(Q) at each upper bin edge: number of pairs with EMD below it.
    pub fn cumulative(&self) -> Vec<Mass> {
        self.hist
            .hist()
            .into_iter()
            .scan(self.hist.underflow(), |c, n| {
                *c += n;
                Some(*c)
            })
            .collect()
    }
    /// Scales at which [`CorrelationDimension::dims`] is evaluated: the
    /// geometric centers of every bin but the first.
    pub fn dims_bins(&self) -> Vec<Energy> {
        self.hist.bin_centers().into_iter().skip(1).collect()
    }
    /// Discrete log-derivative of the cumulative count, one per
    /// [`CorrelationDimension::dims_bins`] entry. Zero where C vanishes.
    pub fn dims(&self) -> Vec<Energy> {
        let edges = self.hist.bin_edges();
        self.cumulative()
            .windows(2)
            .zip(edges[1..].windows(2))
            .map(|(c, e)| match c[0] > 0. && c[1] > 0. {
                true => (c[1] / c[0]).ln() / (e[1] / e[0]).ln(),
                false => 0.,
            })
            .collect()
    }
}

impl Handler for CorrelationDimension {
    fn description(&self) -> String {
        format!(
            "CorrelationDimension {} log bins",
            self.hist.nbins()
        )
    }
    fn begin(&self, n_a: usize, n_b: usize) -> anyhow::Result<()> {
        self.hist.begin(n_a, n_b)
    }
    fn absorb(&self, triples: &[Triple]) {
        self.hist.absorb(triples)
    }
}
