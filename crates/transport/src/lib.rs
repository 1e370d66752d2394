//! Exact optimal transport on flow networks.
//!
//! Every exact Earth Mover's Distance reduces to a min-cost-flow problem
//! on a bipartite network. This crate owns that reduction's lower half:
//! the network representation, the solver contract, and a primal network
//! simplex that solves it to optimality.
//!
//! ## Solvers
//!
//! - [`NetworkSimplex`] — block-search primal network simplex with big-M start
//!
//! ## Core Types
//!
//! - [`Network`] — Arena of nodes (supplies) and arcs (cost, bounds)
//! - [`Solver`] — Contract shared by min-cost-flow solvers
//! - [`Limits`] — Iteration cap and relative tolerance factors
//! - [`Status`] — Outcome of a solve, also the error type of failed ones
//! - [`Coupling`] — A transport plan between two supports
//! - [`Measure`] — Ground distance between support points
//! - [`Support`] — Points that can carry mass
mod coupling;
mod measure;
mod network;
mod simplex;
mod solver;
mod status;
mod support;

pub use coupling::*;
pub use measure::*;
pub use network::*;
pub use simplex::*;
pub use solver::*;
pub use status::*;
pub use support::*;
