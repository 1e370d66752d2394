//! Exact Earth Mover's Distances between weighted particle events.
//!
//! The workspace splits into four crates, all re-exported here:
//!
//! - [`wass_core`] — Type aliases, default constants, logging bootstrap
//! - [`wass_transport`] — Flow networks and the network simplex solver
//! - [`wass_emd`] — Events, ground distances, and the EMD engine
//! - [`wass_pairwise`] — Parallel batches, storage layouts, and handlers
//!
//! ## Usage
//!
//! ```no_run
//! use wasserstein::*;
//!
//! let a = VectorEvent::<Euclidean2>::random(20);
//! let b = VectorEvent::<Euclidean2>::random(30);
//! let mut emd = Emd::<EuclideanDistance2>::new(Params::from((0.4, 1., true)), EuclideanDistance2::default())?;
//! let distance = emd.emd(&a, &b)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
pub use wass_core::*;
pub use wass_emd::*;
pub use wass_pairwise::*;
pub use wass_transport::*;
