use wass_core::Energy;

/// One computed EMD: first event index, second event index, distance.
pub type Triple = (usize, usize, Energy);

/// A streaming consumer of pairwise EMDs.
///
/// Workers hand over their results in batches, concurrently, so a handler
/// serializes its own state updates. Only successful pairs are delivered.
/// The aggregate is read back through the handler's own API once the run
/// is over, which is why the orchestrator holds handlers behind `Arc`.
pub trait Handler: Send + Sync {
    fn description(&self) -> String;
    /// Checks the handler against the shape of a run about to start:
    /// `n_a` first events and `n_b` second events.
    fn begin(&self, n_a: usize, n_b: usize) -> anyhow::Result<()> {
        let _ = (n_a, n_b);
        Ok(())
    }
    /// Absorbs a batch of results.
    fn absorb(&self, triples: &[Triple]);
}
