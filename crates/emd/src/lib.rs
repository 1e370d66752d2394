//! Exact Earth Mover's Distance between weighted particle events.
//!
//! An event is an ordered collection of non-negative weights attached to
//! positions. The EMD between two events is the cheapest way to move one
//! event's weight onto the other's, paying weight times ground distance.
//! This crate turns two events into a transportation problem and solves it
//! exactly with a [`wass_transport::Solver`].
//!
//! ## Engine
//!
//! - [`Emd`] — Reusable engine: one measure, one parameter set, one solver
//! - [`Params`] — Ground metric scale and exponent, normalization, limits
//! - [`EmdResult`] — Status, distance, optional flows and timing
//!
//! ## Events
//!
//! - [`Event`] — Weight/position access contract
//! - [`VectorEvent`] — Owned event backed by two vectors
//! - [`Euclidean`], [`YPhi`] — Particle positions
//!
//! ## Ground Distances
//!
//! - [`EuclideanDistance`] — L2 distance in D dimensions
//! - [`YPhiDistance`] — Rapidity–azimuth distance with azimuth wrapping
//! - [`Precomputed`] — Dense external distance matrix over index particles
//!
//! ## Preprocessing
//!
//! - [`Preprocessor`] — Event-to-event transform applied before pairing
//! - [`CenterWeightedCentroid`] — Recenters an event on its weighted centroid
mod distance;
mod engine;
mod event;
mod extra;
mod params;
mod particle;
mod preprocess;
mod problem;
mod result;

pub use distance::*;
pub use engine::*;
pub use event::*;
pub use extra::*;
pub use params::*;
pub use particle::*;
pub use preprocess::*;
pub use problem::*;
pub use result::*;
