//! Batches of exact EMDs across event collections.
//!
//! [`PairwiseEmd`] computes every EMD within one collection (symmetric mode)
//! or between two collections (cross mode) on a rayon thread pool. Results
//! land in a [`Storage`] layout fixed for the run, or stream to registered
//! [`Handler`]s that aggregate them without storing every value.
//!
//! ## Handlers
//!
//! - [`Histogram1D`] — Linear or log binned distribution of EMD values
//! - [`CorrelationDimension`] — Log-derivative of the cumulative EMD count
mod batch;
mod correlation;
mod handler;
mod histogram;
mod pair;
mod pairwise;
mod storage;

pub use batch::*;
pub use correlation::*;
pub use handler::*;
pub use histogram::*;
pub use pair::*;
pub use pairwise::*;
pub use storage::*;
