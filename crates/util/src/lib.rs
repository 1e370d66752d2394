//! Core type aliases, traits, and constants for exact EMD computation.
//!
//! This crate provides the foundational types and default configuration
//! parameters used throughout the workspace. Every default here is only a
//! default: the values that actually drive a computation travel inside
//! explicit configuration structs, never through global state.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Ground distances, transport costs, and EMD values.
pub type Energy = f64;
/// Particle weights, node supplies, and transported flow.
pub type Mass = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GROUND METRIC
// Arc cost between particles i and j is (d(i, j) / R)^β.
// ============================================================================
/// Ground distance scale. Distances are measured in units of R.
pub const EMD_R: Energy = 1.0;
/// Ground distance exponent. β = 1 gives the Wasserstein-1 metric.
pub const EMD_BETA: Energy = 1.0;
/// Cost per unit of mass created or destroyed by the synthetic extra particle.
/// A value of 1 places the extra particle at distance R from everything.
pub const EMD_EXTRA_COST: Energy = 1.0;

// ============================================================================
// NETWORK SIMPLEX
// Tolerances are relative: ε = factor · f64::EPSILON · problem scale.
// ============================================================================
/// Maximum pivots per solve before reporting MaxIterReached.
pub const EMD_ITERATIONS: usize = 100_000;
/// Tolerance factor for supply balance and leftover artificial flow.
/// Raise this if balanced inputs report SupplyMismatch.
pub const EMD_EPSILON_LARGE_FACTOR: f64 = 1000.0;
/// Tolerance factor for reduced-cost optimality checks.
pub const EMD_EPSILON_SMALL_FACTOR: f64 = 1.0;
/// Minimum number of arcs scanned per pivot block.
pub const SIMPLEX_MIN_BLOCK: usize = 10;

// ============================================================================
// PAIRWISE BATCHES
// ============================================================================
/// Pairs a worker computes before flushing results to handlers.
pub const PAIRWISE_CHUNK: usize = 64;
/// Number of progress log lines emitted over one batch (0 disables).
pub const PAIRWISE_PROGRESS_STEPS: usize = 10;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, `terminal` level to stderr.
#[cfg(feature = "cli")]
pub fn log(terminal: log::LevelFilter) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/emd-{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        terminal,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
