use super::batch::Batch;
use super::handler::Handler;
use super::handler::Triple;
use super::pair::Pair;
use super::storage::Storage;
use rayon::prelude::*;
use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;
use wass_core::Energy;
use wass_emd::Emd;
use wass_emd::Event;
use wass_emd::Params;
use wass_emd::Preprocessor;
use wass_transport::Measure;
use wass_transport::NetworkSimplex;
use wass_transport::Solver;
use wass_transport::Status;

/// A pair whose EMD did not come out as [`Status::Success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure {
    pub i: usize,
    pub j: usize,
    pub status: Status,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "pair ({}, {}) failed: {}", self.i, self.j, self.status)
    }
}

/// Every EMD within one collection of events, or between two.
///
/// Symmetric mode (no second collection) computes each unordered pair
/// `i < j` once. Cross mode computes the full `n_a × n_b` grid. Pairs run in
/// parallel on a dedicated rayon pool, each worker with its own [`Emd`].
///
/// # Storage
///
/// Registering any [`Handler`] switches the run to [`Storage::External`]:
/// results stream to the handlers and nothing is stored. Otherwise cross
/// mode stores [`Storage::Full`] and symmetric mode stores
/// [`Storage::FlattenedSymmetric`], or [`Storage::FullSymmetric`] when
/// [`Batch::symmetric`] is set.
///
/// # Failures
///
/// A failed pair is recorded in [`PairwiseEmd::statuses`] and
/// [`PairwiseEmd::failures`] and its stored cell stays NaN. It is never
/// delivered to handlers. With [`Batch::halt`], no new pair starts after
/// the first failure and [`PairwiseEmd::compute`] returns that failure.
pub struct PairwiseEmd<M, E, S = NetworkSimplex>
where
    M: Measure<X = E::P, Y = E::P> + Clone + Send + Sync,
    E: Event,
    S: Solver,
{
    params: Params,
    measure: M,
    batch: Batch,
    preprocessors: Vec<Box<dyn Preprocessor<E>>>,
    handlers: Vec<Arc<dyn Handler>>,
    storage: Storage,
    symmetric: bool,
    n_a: usize,
    n_b: usize,
    emds: Vec<Energy>,
    statuses: Vec<Option<Status>>,
    failures: Vec<Failure>,
    duration: Duration,
    solver: PhantomData<fn() -> S>,
}

impl<M, E, S> PairwiseEmd<M, E, S>
where
    M: Measure<X = E::P, Y = E::P> + Clone + Send + Sync,
    E: Event,
    S: Solver,
{
    pub fn new(params: Params, measure: M, batch: Batch) -> anyhow::Result<Self> {
        params.check()?;
        anyhow::ensure!(batch.chunk > 0, "chunk must be positive");
        Ok(Self {
            params,
            measure,
            batch,
            preprocessors: Vec::new(),
            handlers: Vec::new(),
            storage: Storage::default(),
            symmetric: false,
            n_a: 0,
            n_b: 0,
            emds: Vec::new(),
            statuses: Vec::new(),
            failures: Vec::new(),
            duration: Duration::ZERO,
            solver: PhantomData,
        })
    }
    /// Appends a preprocessor. Preprocessors apply in registration order.
    pub fn preprocess<P>(&mut self, preprocessor: P) -> &mut Self
    where
        P: Preprocessor<E> + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }
    /// Registers a handler. Subsequent runs stream to it instead of storing.
    pub fn handle(&mut self, handler: Arc<dyn Handler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }
    pub fn clear_handlers(&mut self) -> &mut Self {
        self.handlers.clear();
        self
    }

    /// Computes all pairs within `a`, or between `a` and `b`.
    ///
    /// Results from any previous run are discarded.
    pub fn compute(&mut self, a: &[E], b: Option<&[E]>) -> anyhow::Result<()> {
        let start = Instant::now();
        self.reset(a.len(), b.map(|b| b.len()));
        log::info!(
            "{:<32}{:<32}",
            "computing pairwise emds",
            format!("{} x {} ({})", self.n_a, self.n_b, self.storage)
        );
        log::debug!("\n{}", self.description());
        for handler in self.handlers.iter() {
            handler.begin(self.n_a, self.n_b)?;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.batch.threads())
            .build()?;
        pool.install(|| {
            let a = self.prepare(a);
            let b = b.map(|b| self.prepare(b));
            let b = b.as_deref().unwrap_or(&a[..]);
            match self.storage {
                Storage::External => self.stream(&a, b),
                _ => self.fill(&a, b),
            }
        });
        if self.storage == Storage::FullSymmetric {
            self.expand();
        }
        self.duration = start.elapsed();
        self.failures.sort_by_key(|f| (f.i, f.j));
        log::info!(
            "{:<32}{:<32}",
            "computed pairwise emds",
            format!("{} in {:.2?}", self.num_emds(), self.duration)
        );
        if !self.failures.is_empty() {
            log::warn!("{:<32}{:<32}", "failed pairs", self.failures.len());
            self.failures.iter().for_each(|f| log::debug!("{}", f));
        }
        match self.failures.first() {
            Some(failure) if self.batch.halt => Err(anyhow::Error::new(failure.status)
                .context(format!("pair ({}, {}) failed", failure.i, failure.j))),
            _ => Ok(()),
        }
    }

    /// Sizes storage and status tables for a new run.
    fn reset(&mut self, n_a: usize, n_b: Option<usize>) {
        self.symmetric = n_b.is_none();
        self.n_a = n_a;
        self.n_b = n_b.unwrap_or(n_a);
        self.storage = Storage::choose(
            self.symmetric,
            !self.handlers.is_empty(),
            self.batch.symmetric,
        );
        let pairs = self.num_emds();
        self.statuses.clear();
        self.statuses.resize(pairs, None);
        self.emds.clear();
        if self.storage != Storage::External {
            self.emds.resize(pairs, Energy::NAN);
        }
        self.failures.clear();
        self.duration = Duration::ZERO;
    }

    /// Runs every preprocessor over every event once, in parallel.
    /// Borrows the events untouched when there is nothing to apply.
    fn prepare<'e>(&self, events: &'e [E]) -> Cow<'e, [E]> {
        if self.preprocessors.is_empty() {
            return Cow::Borrowed(events);
        }
        Cow::Owned(
            events
                .par_iter()
                .cloned()
                .map(|e| self.preprocessors.iter().fold(e, |e, p| p.apply(e)))
                .collect(),
        )
    }

    /// Writes every result into its storage slot.
    fn fill(&mut self, a: &[E], b: &[E]) {
        let chunk = self.batch.chunk;
        let ref sweep = Sweep::new(a, b, self.symmetric, self.n_b, &self.batch, self.statuses.len());
        let params = self.params;
        let ref measure = self.measure;
        self.emds
            .par_chunks_mut(chunk)
            .zip(self.statuses.par_chunks_mut(chunk))
            .enumerate()
            .for_each_init(
                || Emd::<M, S>::from((params, measure.clone())),
                |emd, (c, (emds, statuses))| {
                    sweep.evaluate(emd, c * chunk, statuses, |k, (_, _, d)| emds[k] = d)
                },
            );
        self.failures = sweep.finish();
    }

    /// Hands every successful result to every handler, one chunk at a time.
    fn stream(&mut self, a: &[E], b: &[E]) {
        let chunk = self.batch.chunk;
        let ref sweep = Sweep::new(a, b, self.symmetric, self.n_b, &self.batch, self.statuses.len());
        let params = self.params;
        let ref measure = self.measure;
        let ref handlers = self.handlers;
        self.statuses
            .par_chunks_mut(chunk)
            .enumerate()
            .for_each_init(
                || {
                    (
                        Emd::<M, S>::from((params, measure.clone())),
                        Vec::<Triple>::with_capacity(chunk),
                    )
                },
                |(emd, buffer), (c, statuses)| {
                    buffer.clear();
                    sweep.evaluate(emd, c * chunk, statuses, |_, triple| buffer.push(triple));
                    handlers.iter().for_each(|h| h.absorb(buffer.as_slice()));
                },
            );
        self.failures = sweep.finish();
    }

    /// Unpacks the condensed triangle into a dense matrix with zero diagonal.
    fn expand(&mut self) {
        self.emds = self.unpack();
    }
    fn unpack(&self) -> Vec<Energy> {
        let n = self.n_a;
        let mut full = vec![0.; n * n];
        for (k, d) in self.emds.iter().enumerate() {
            let pair = Pair::split(k, n);
            full[pair.i() * n + pair.j()] = *d;
            full[pair.j() * n + pair.i()] = *d;
        }
        full
    }

    /// Position of `(i, j)` in the status table.
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        match self.symmetric {
            _ if i >= self.n_a || j >= self.n_b => None,
            true if i == j => None,
            true => Some(Pair::from((i, j)).triangular(self.n_a)),
            false => Some(i * self.n_b + j),
        }
    }

    /// The stored EMD between events `i` and `j`.
    ///
    /// Fails for streamed runs, out-of-range indices, failed pairs (with
    /// the pair's [`Status`] as the source), and pairs skipped by a halt.
    pub fn emd(&self, i: usize, j: usize) -> anyhow::Result<Energy> {
        anyhow::ensure!(
            self.storage != Storage::External,
            "emds were streamed to handlers, not stored"
        );
        anyhow::ensure!(
            i < self.n_a && j < self.n_b,
            "pair ({}, {}) out of range for {} x {}",
            i,
            j,
            self.n_a,
            self.n_b
        );
        let Some(k) = self.index(i, j) else {
            return Ok(0.);
        };
        match self.statuses[k] {
            None => anyhow::bail!("pair ({}, {}) was not computed", i, j),
            Some(Status::Success) => Ok(match self.storage {
                Storage::FullSymmetric => self.emds[i * self.n_a + j],
                _ => self.emds[k],
            }),
            Some(status) => {
                Err(anyhow::Error::new(status).context(format!("pair ({}, {}) failed", i, j)))
            }
        }
    }
    /// Raw storage in the layout given by [`PairwiseEmd::storage`].
    pub fn emds(&self) -> &[Energy] {
        &self.emds
    }
    /// Dense row-major `n_a × n_b` view of the stored results.
    pub fn matrix(&self) -> anyhow::Result<Vec<Energy>> {
        match self.storage {
            Storage::External => anyhow::bail!("emds were streamed to handlers, not stored"),
            Storage::FlattenedSymmetric => Ok(self.unpack()),
            Storage::Full | Storage::FullSymmetric => Ok(self.emds.clone()),
        }
    }
    /// Per-pair outcome in pair order. None marks a pair skipped by a halt.
    pub fn statuses(&self) -> &[Option<Status>] {
        &self.statuses
    }
    pub fn status(&self, i: usize, j: usize) -> Option<Status> {
        self.index(i, j).and_then(|k| self.statuses[k])
    }
    /// Failed pairs of the last run, ordered by pair.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
    pub fn n_a(&self) -> usize {
        self.n_a
    }
    pub fn n_b(&self) -> usize {
        self.n_b
    }
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }
    /// Number of pairs in the last run.
    pub fn num_emds(&self) -> usize {
        match self.symmetric {
            true => Pair::count(self.n_a),
            false => self.n_a * self.n_b,
        }
    }
    pub fn storage(&self) -> Storage {
        self.storage
    }
    /// Wall-clock time of the last run.
    pub fn duration(&self) -> Duration {
        self.duration
    }
    pub fn description(&self) -> String {
        let engine = Emd::<M, S>::from((self.params, self.measure.clone())).description();
        let mut lines = vec![
            String::from("PairwiseEMD"),
            format!("{:<24}{}", "n_jobs", self.batch.threads()),
            format!("{:<24}{}", "chunk", self.batch.chunk),
            format!("{:<24}{}", "halt", self.batch.halt),
            format!("{:<24}{}", "storage", self.storage),
        ];
        lines.extend(
            self.preprocessors
                .iter()
                .map(|p| format!("{:<24}{}", "preprocessor", p.description())),
        );
        lines.extend(
            self.handlers
                .iter()
                .map(|h| format!("{:<24}{}", "handler", h.description())),
        );
        lines.push(engine);
        lines.join("\n")
    }
}

/// Builds an orchestrator with the default [`Batch`].
impl<M, E, S> From<(Params, M)> for PairwiseEmd<M, E, S>
where
    M: Measure<X = E::P, Y = E::P> + Clone + Send + Sync,
    E: Event,
    S: Solver,
{
    fn from((params, measure): (Params, M)) -> Self {
        Self {
            params,
            measure,
            batch: Batch::default(),
            preprocessors: Vec::new(),
            handlers: Vec::new(),
            storage: Storage::default(),
            symmetric: false,
            n_a: 0,
            n_b: 0,
            emds: Vec::new(),
            statuses: Vec::new(),
            failures: Vec::new(),
            duration: Duration::ZERO,
            solver: PhantomData,
        }
    }
}

/// Shared state of one parallel sweep over pairs.
struct Sweep<'a, E> {
    a: &'a [E],
    b: &'a [E],
    symmetric: bool,
    n: usize,
    n_b: usize,
    halt: bool,
    halted: AtomicBool,
    total: usize,
    every: usize,
    done: AtomicUsize,
    failures: Mutex<Vec<Failure>>,
    start: Instant,
}

impl<'a, E: Event> Sweep<'a, E> {
    fn new(a: &'a [E], b: &'a [E], symmetric: bool, n_b: usize, batch: &Batch, total: usize) -> Self {
        let every = match batch.progress {
            0 => usize::MAX,
            steps => (total / steps).max(1),
        };
        Self {
            a,
            b,
            symmetric,
            n: a.len(),
            n_b,
            halt: batch.halt,
            halted: AtomicBool::new(false),
            total,
            every,
            done: AtomicUsize::new(0),
            failures: Mutex::new(Vec::new()),
            start: Instant::now(),
        }
    }

    /// Event indices of pair number `k`.
    fn locate(&self, k: usize) -> (usize, usize) {
        match self.symmetric {
            true => {
                let pair = Pair::split(k, self.n);
                (pair.i(), pair.j())
            }
            false => (k / self.n_b, k % self.n_b),
        }
    }

    /// Computes the pairs `offset..offset + statuses.len()`, recording each
    /// outcome and passing successes to `sink` with their chunk-local index.
    fn evaluate<M, S>(
        &self,
        emd: &mut Emd<M, S>,
        offset: usize,
        statuses: &mut [Option<Status>],
        mut sink: impl FnMut(usize, Triple),
    ) where
        M: Measure<X = E::P, Y = E::P>,
        S: Solver,
    {
        let mut computed = 0;
        for (k, slot) in statuses.iter_mut().enumerate() {
            if self.halt && self.halted.load(Ordering::Relaxed) {
                break;
            }
            let (i, j) = self.locate(offset + k);
            let result = emd.compute(&self.a[i], &self.b[j]);
            *slot = Some(result.status());
            computed += 1;
            match result.distance() {
                Some(d) => sink(k, (i, j, d)),
                None => self.fail(Failure {
                    i,
                    j,
                    status: result.status(),
                }),
            }
        }
        self.tick(computed);
    }

    fn fail(&self, failure: Failure) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(failure);
        if self.halt {
            self.halted.store(true, Ordering::Relaxed);
        }
    }

    /// Logs progress whenever the completed count crosses a multiple of `every`.
    fn tick(&self, n: usize) {
        let before = self.done.fetch_add(n, Ordering::Relaxed);
        let after = before + n;
        if after / self.every > before / self.every {
            let elapsed = self.start.elapsed();
            log::debug!(
                "progress: {:8.0?} {:>10} {:6.2}%   mean {:6.0}/s",
                elapsed,
                after,
                after as f64 / self.total.max(1) as f64 * 100.,
                after as f64 / elapsed.as_secs_f64().max(f64::MIN_POSITIVE),
            );
        }
    }

    fn finish(&self) -> Vec<Failure> {
        std::mem::take(
            &mut *self
                .failures
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}
