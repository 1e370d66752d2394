use super::network::Network;
use super::solver::Limits;
use super::solver::Solver;
use super::status::Status;
use wass_core::Energy;
use wass_core::Mass;

/// Sentinel for "no node" / "no arc" in the spanning tree arena.
const NONE: usize = usize::MAX;

/// Where a non-tree arc's flow sits, or that the arc is basic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Upper,
    Tree,
    Lower,
}

impl State {
    /// Sign that turns a reduced cost into "improvement if negative".
    fn sign(self) -> Energy {
        match self {
            State::Upper => -1.,
            State::Tree => 0.,
            State::Lower => 1.,
        }
    }
    fn flip(self) -> Self {
        match self {
            State::Upper => State::Lower,
            State::Lower => State::Upper,
            State::Tree => State::Tree,
        }
    }
}

/// Orientation of a node's tree arc relative to the node.
/// `Up` means the arc leaves the node towards its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Up,
    Down,
}

impl Dir {
    fn sign(self) -> Mass {
        match self {
            Dir::Up => 1.,
            Dir::Down => -1.,
        }
    }
    fn flip(self) -> Self {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }
}

/// Which part of the pivot cycle holds the blocking arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// The entering arc itself hits its opposite bound.
    Entering,
    /// Path from the first cycle node up to the join.
    First,
    /// Path from the second cycle node up to the join.
    Second,
}

/// Everything one pivot needs after the ratio test.
#[derive(Debug, Clone, Copy)]
struct Pivot {
    /// Entering arc.
    arc: usize,
    /// Lowest common ancestor of the entering arc's endpoints.
    join: usize,
    /// Flow pushed around the cycle.
    delta: Mass,
    side: Side,
    /// Endpoint of the entering arc on the leaving side; root of the moved subtree.
    u_in: usize,
    /// Other endpoint of the entering arc; new parent of `u_in`.
    v_in: usize,
    /// Node whose tree arc leaves the basis.
    u_out: usize,
}

/// Primal network simplex for min-cost flow.
///
/// Maintains a strongly feasible spanning tree over all nodes plus an
/// artificial root. Each node starts attached to the root by a big-M
/// artificial arc, which gives a basic feasible solution for any supplies.
/// Pivots then exchange one non-tree arc for one tree arc until no arc has
/// a negative reduced cost.
///
/// # Pivot rule
///
/// Block search: arcs are scanned cyclically in blocks of √m, and the most
/// violating arc of the first block containing any violation enters. The
/// leaving arc is the last blocking arc met along the cycle orientation,
/// which keeps the tree strongly feasible and rules out cycling.
///
/// # Tree storage
///
/// The tree lives in index vectors: `parent`, `pred` (tree arc to the
/// parent), `dir`, `thread` (preorder successor), `rev` (preorder
/// predecessor) and `succ` (subtree size). A pivot only touches the moved
/// subtree and the two paths from its old and new parents up to the join:
/// the subtree is re-threaded and re-hung, and its potentials are shifted.
///
/// # Reuse
///
/// All buffers survive between solves. Keep one solver per thread.
#[derive(Debug, Default, Clone)]
pub struct NetworkSimplex {
    /// Real nodes; the artificial root has index `n`.
    n: usize,
    /// Real arcs; artificial arcs occupy `m..m + n`.
    m: usize,
    source: Vec<usize>,
    target: Vec<usize>,
    cost: Vec<Energy>,
    /// Residual capacity after removing lower bounds.
    cap: Vec<Mass>,
    lower: Vec<Mass>,
    supply: Vec<Mass>,
    flow: Vec<Mass>,
    state: Vec<State>,
    parent: Vec<usize>,
    pred: Vec<usize>,
    dir: Vec<Dir>,
    thread: Vec<usize>,
    rev: Vec<usize>,
    succ: Vec<usize>,
    pi: Vec<Energy>,
    /// Preorder of the moved subtree as it will hang after a pivot.
    order: Vec<usize>,
    block: usize,
    next: usize,
    flows: Vec<Mass>,
    objective: Energy,
    iterations: usize,
}

impl NetworkSimplex {
    /// Copies the network in, shifting lower bounds into supplies.
    fn load(&mut self, network: &Network) -> Result<(), Status> {
        self.n = network.n_nodes();
        self.m = network.n_arcs();
        self.source.clear();
        self.target.clear();
        self.cost.clear();
        self.cap.clear();
        self.lower.clear();
        self.supply.clear();
        self.supply
            .extend((0..self.n).map(|u| network.supply(u)));
        for e in 0..self.m {
            let (s, t) = (network.source(e), network.target(e));
            let (lo, hi) = (network.lower(e), network.upper(e));
            let cost = network.cost(e);
            if !lo.is_finite() || !cost.is_finite() || hi.is_nan() || hi < lo {
                return Err(Status::Infeasible);
            }
            self.source.push(s);
            self.target.push(t);
            self.cost.push(cost);
            self.cap.push(hi - lo);
            self.lower.push(lo);
            if lo != 0. {
                self.supply[s] -= lo;
                self.supply[t] += lo;
            }
        }
        if self.supply.iter().any(|s| !s.is_finite()) {
            return Err(Status::Infeasible);
        }
        Ok(())
    }

    /// Largest real arc cost magnitude, inflated past any simple path cost.
    fn big_m(&self) -> Energy {
        let max = self.cost[..self.m]
            .iter()
            .map(|c| c.abs())
            .fold(0., Energy::max);
        (max + 1.) * self.n as Energy
    }

    /// Builds the initial tree: every node hangs off the root by an artificial arc.
    fn init(&mut self, big_m: Energy) {
        let (n, m) = (self.n, self.m);
        let root = n;
        let imbalance = self.supply.iter().sum::<Mass>();
        self.supply.push(-imbalance);
        self.flow.clear();
        self.flow.resize(m, 0.);
        self.state.clear();
        self.state.resize(m, State::Lower);
        self.parent.clear();
        self.parent.resize(n + 1, NONE);
        self.pred.clear();
        self.pred.resize(n + 1, NONE);
        self.dir.clear();
        self.dir.resize(n + 1, Dir::Up);
        self.thread.clear();
        self.thread.resize(n + 1, 0);
        self.succ.clear();
        self.succ.resize(n + 1, 1);
        self.pi.clear();
        self.pi.resize(n + 1, 0.);
        for u in 0..n {
            let e = m + u;
            self.parent[u] = root;
            self.pred[u] = e;
            self.thread[u] = u + 1;
            self.cap.push(Mass::INFINITY);
            self.lower.push(0.);
            self.state.push(State::Tree);
            if self.supply[u] > 0. {
                self.dir[u] = Dir::Up;
                self.source.push(u);
                self.target.push(root);
                self.flow.push(self.supply[u]);
                self.cost.push(0.);
            } else {
                // zero-supply nodes hang downward so every zero-flow
                // tree arc points away from the root
                self.dir[u] = Dir::Down;
                self.pi[u] = big_m;
                self.source.push(root);
                self.target.push(u);
                self.flow.push(-self.supply[u]);
                self.cost.push(big_m);
            }
        }
        self.thread[root] = 0;
        self.rev.clear();
        self.rev.resize(n + 1, 0);
        for u in 0..=n {
            self.rev[self.thread[u]] = u;
        }
        self.succ[root] = n + 1;
        self.block = ((m as f64).sqrt() as usize).max(wass_core::SIMPLEX_MIN_BLOCK);
        self.next = 0;
    }

    /// Reduced cost of arc `e`, signed so that negative means improving.
    fn violation(&self, e: usize) -> Energy {
        self.state[e].sign() * (self.cost[e] + self.pi[self.source[e]] - self.pi[self.target[e]])
    }

    /// Block search for an entering arc. Artificial arcs never re-enter.
    fn entering(&mut self, tolerance: Energy) -> Option<usize> {
        let m = self.m;
        let mut best = -tolerance;
        let mut arc = None;
        let mut count = self.block;
        for e in (self.next..m).chain(0..self.next) {
            let c = self.violation(e);
            if c < best {
                best = c;
                arc = Some(e);
            }
            count -= 1;
            if count == 0 {
                if arc.is_some() {
                    self.next = (e + 1) % m;
                    return arc;
                }
                count = self.block;
            }
        }
        arc
    }

    /// Lowest common ancestor of the entering arc's endpoints.
    fn join(&self, arc: usize) -> usize {
        let mut u = self.source[arc];
        let mut v = self.target[arc];
        while u != v {
            if self.succ[u] < self.succ[v] {
                u = self.parent[u];
            } else {
                v = self.parent[v];
            }
        }
        u
    }

    /// Ratio test around the cycle closed by `arc`. None means unbounded.
    fn leaving(&self, arc: usize, join: usize) -> Option<Pivot> {
        let (first, second) = match self.state[arc] {
            State::Lower => (self.source[arc], self.target[arc]),
            _ => (self.target[arc], self.source[arc]),
        };
        let mut delta = self.cap[arc];
        let mut side = Side::Entering;
        let mut u_out = NONE;
        let mut u = first;
        while u != join {
            let e = self.pred[u];
            let d = match self.dir[u] {
                Dir::Up => self.flow[e],
                Dir::Down => self.cap[e] - self.flow[e],
            };
            if d < delta {
                delta = d;
                u_out = u;
                side = Side::First;
            }
            u = self.parent[u];
        }
        let mut u = second;
        while u != join {
            let e = self.pred[u];
            let d = match self.dir[u] {
                Dir::Up => self.cap[e] - self.flow[e],
                Dir::Down => self.flow[e],
            };
            if d <= delta {
                delta = d;
                u_out = u;
                side = Side::Second;
            }
            u = self.parent[u];
        }
        if delta.is_infinite() {
            return None;
        }
        let (u_in, v_in) = match side {
            Side::First => (first, second),
            _ => (second, first),
        };
        Some(Pivot {
            arc,
            join,
            delta: delta.max(0.),
            side,
            u_in,
            v_in,
            u_out,
        })
    }

    /// Pushes `delta` around the cycle and settles the arcs that change state.
    fn augment(&mut self, pivot: &Pivot) {
        let arc = pivot.arc;
        if pivot.delta > 0. {
            let val = self.state[arc].sign() * pivot.delta;
            self.flow[arc] += val;
            let mut u = self.source[arc];
            while u != pivot.join {
                let e = self.pred[u];
                self.flow[e] -= self.dir[u].sign() * val;
                u = self.parent[u];
            }
            let mut u = self.target[arc];
            while u != pivot.join {
                let e = self.pred[u];
                self.flow[e] += self.dir[u].sign() * val;
                u = self.parent[u];
            }
        }
        match pivot.side {
            Side::Entering => {
                self.state[arc] = self.state[arc].flip();
                self.flow[arc] = match self.state[arc] {
                    State::Upper => self.cap[arc],
                    _ => 0.,
                };
            }
            side => {
                let e = self.pred[pivot.u_out];
                let saturated = matches!(
                    (side, self.dir[pivot.u_out]),
                    (Side::First, Dir::Down) | (Side::Second, Dir::Up)
                );
                self.state[arc] = State::Tree;
                if saturated {
                    self.state[e] = State::Upper;
                    self.flow[e] = self.cap[e];
                } else {
                    self.state[e] = State::Lower;
                    self.flow[e] = 0.;
                }
            }
        }
    }

    /// Reverses the stem from `u_in` to `u_out` and hangs it under `v_in`.
    fn rehang(&mut self, pivot: &Pivot) {
        let mut prev = pivot.v_in;
        let mut arc = pivot.arc;
        let mut dir = if pivot.u_in == self.source[pivot.arc] {
            Dir::Up
        } else {
            Dir::Down
        };
        let mut u = pivot.u_in;
        loop {
            let parent = self.parent[u];
            let pred = self.pred[u];
            let old = self.dir[u];
            self.parent[u] = prev;
            self.pred[u] = arc;
            self.dir[u] = dir;
            if u == pivot.u_out {
                break;
            }
            prev = u;
            arc = pred;
            dir = old.flip();
            u = parent;
        }
    }

    /// Moves the subtree of `u_out` under `v_in` in the threading and the
    /// subtree sizes. Reads the old parents, so it runs before `rehang`.
    ///
    /// Re-rooted at `u_in`, the stem `s_0 = u_in, .., s_k = u_out` keeps its
    /// old preorder piece by piece: all of `s_0`'s subtree, then each `s_i`
    /// with its subtree minus the subtree of `s_(i-1)`.
    fn rethread(&mut self, pivot: &Pivot) {
        self.order.clear();
        let mut u = pivot.u_in;
        let mut prev = NONE;
        let mut last = NONE;
        loop {
            self.order.push(u);
            let mut tail = u;
            let mut skipped = prev == NONE;
            let mut rest = match skipped {
                true => self.succ[u] - 1,
                false => self.succ[u] - 1 - self.succ[prev],
            };
            let mut v = self.thread[u];
            while rest > 0 || !skipped {
                if v == prev {
                    tail = last;
                    v = self.thread[last];
                    skipped = true;
                } else {
                    self.order.push(v);
                    tail = v;
                    v = self.thread[v];
                    rest -= 1;
                }
            }
            last = tail;
            if u == pivot.u_out {
                break;
            }
            prev = u;
            u = self.parent[u];
        }
        let total = self.succ[pivot.u_out];
        let before = self.rev[pivot.u_out];
        let after = self.thread[last];
        let mut u = self.parent[pivot.u_out];
        while u != pivot.join {
            self.succ[u] -= total;
            u = self.parent[u];
        }
        let mut u = pivot.v_in;
        while u != pivot.join {
            self.succ[u] += total;
            u = self.parent[u];
        }
        let mut u = pivot.u_in;
        let mut inner = 0;
        loop {
            let old = self.succ[u];
            self.succ[u] = total - inner;
            if u == pivot.u_out {
                break;
            }
            inner = old;
            u = self.parent[u];
        }
        self.thread[before] = after;
        self.rev[after] = before;
        let next = self.thread[pivot.v_in];
        let mut prev = pivot.v_in;
        for &u in self.order.iter() {
            self.thread[prev] = u;
            self.rev[u] = prev;
            prev = u;
        }
        self.thread[prev] = next;
        self.rev[next] = prev;
    }

    /// Restores zero reduced cost on the entering arc by shifting the moved subtree.
    fn reprice(&mut self, pivot: &Pivot) {
        let sigma = self.pi[pivot.v_in]
            - self.pi[pivot.u_in]
            - self.dir[pivot.u_in].sign() * self.cost[pivot.arc];
        let mut u = pivot.u_in;
        for _ in 0..self.succ[pivot.u_in] {
            self.pi[u] += sigma;
            u = self.thread[u];
        }
    }

    fn run(&mut self, limits: &Limits, tolerance: Energy) -> Status {
        while let Some(arc) = self.entering(tolerance) {
            if self.iterations >= limits.iterations {
                return Status::MaxIterReached;
            }
            let join = self.join(arc);
            let Some(ref pivot) = self.leaving(arc, join) else {
                return Status::Unbounded;
            };
            self.augment(pivot);
            if pivot.side != Side::Entering {
                self.rethread(pivot);
                self.rehang(pivot);
                self.reprice(pivot);
            }
            self.iterations += 1;
        }
        Status::Success
    }

    /// Restores lower bounds and totals the objective.
    fn collect(&mut self) {
        self.flows.clear();
        self.flows.extend(
            self.flow[..self.m]
                .iter()
                .zip(self.lower.iter())
                .map(|(f, lo)| f.max(0.) + lo),
        );
        self.objective = self
            .flows
            .iter()
            .zip(self.cost.iter())
            .map(|(f, c)| f * c)
            .sum();
    }
}

impl Solver for NetworkSimplex {
    fn solve(&mut self, network: &Network, limits: &Limits) -> Status {
        self.iterations = 0;
        self.objective = 0.;
        self.flows.clear();
        if network.n_nodes() == 0 {
            return Status::Empty;
        }
        if let Err(status) = self.load(network) {
            return status;
        }
        let mass = self.supply.iter().map(|s| s.abs()).sum::<Mass>() / 2.;
        let eps_flow = limits.epsilon_large_factor * Mass::EPSILON * mass;
        if self.supply.iter().sum::<Mass>().abs() > eps_flow {
            return Status::SupplyMismatch;
        }
        let big_m = self.big_m();
        let eps_cost = limits.epsilon_small_factor * Energy::EPSILON * big_m;
        self.init(big_m);
        match self.run(limits, eps_cost) {
            Status::Success => {}
            status => return status,
        }
        if self.flow[self.m..].iter().any(|f| *f > eps_flow) {
            return Status::Infeasible;
        }
        self.collect();
        Status::Success
    }
    fn flows(&self) -> &[Mass] {
        &self.flows
    }
    fn potentials(&self) -> &[Energy] {
        &self.pi[..self.n.min(self.pi.len())]
    }
    fn cost(&self) -> Energy {
        self.objective
    }
    fn iterations(&self) -> usize {
        self.iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    /// Bipartite transport network with all supply→demand arcs in row-major order.
    fn transport(supply: &[Mass], demand: &[Mass], costs: &[Energy]) -> Network {
        let mut network = Network::default();
        let rows = supply.iter().map(|&s| network.node(s)).collect::<Vec<_>>();
        let cols = demand.iter().map(|&d| network.node(-d)).collect::<Vec<_>>();
        for (i, &u) in rows.iter().enumerate() {
            for (j, &v) in cols.iter().enumerate() {
                network.arc(u, v, costs[i * cols.len() + j]);
            }
        }
        network
    }

    /// Threading is a preorder of the parent tree and sizes match it.
    fn assert_tree(solver: &NetworkSimplex) {
        let nodes = solver.n + 1;
        let root = solver.n;
        let mut seen = vec![false; nodes];
        let mut u = root;
        let mut order = Vec::with_capacity(nodes);
        for _ in 0..nodes {
            assert!(!seen[u], "node {} threaded twice", u);
            seen[u] = true;
            order.push(u);
            assert_eq!(solver.rev[solver.thread[u]], u);
            u = solver.thread[u];
        }
        assert_eq!(u, root);
        let mut sizes = vec![1usize; nodes];
        for v in 0..solver.n {
            let mut p = solver.parent[v];
            while p != NONE {
                sizes[p] += 1;
                p = solver.parent[p];
            }
        }
        assert_eq!(sizes, solver.succ);
        for (k, &v) in order.iter().enumerate() {
            for &w in &order[k + 1..k + solver.succ[v]] {
                let mut p = solver.parent[w];
                while p != v {
                    assert_ne!(p, NONE, "{} not under {}", w, v);
                    p = solver.parent[p];
                }
            }
        }
    }

    fn solve(network: &Network) -> (Status, NetworkSimplex) {
        let mut solver = NetworkSimplex::default();
        let status = solver.solve(network, &Limits::default());
        (status, solver)
    }

    #[test]
    fn is_balanced_transport_exact() {
        // particles at 0 and 1 moving onto two particles at 0.5
        let network = transport(&[1., 1.], &[1., 1.], &[0.5, 0.5, 0.5, 0.5]);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        assert!((solver.cost() - 1.).abs() < TOLERANCE);
        assert!((solver.flows().iter().sum::<Mass>() - 2.).abs() < TOLERANCE);
    }
    #[test]
    fn is_diagonal_transport_free() {
        let network = transport(&[1., 2.], &[1., 2.], &[0., 5., 5., 0.]);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        assert!(solver.cost().abs() < TOLERANCE);
        assert!((solver.flows()[0] - 1.).abs() < TOLERANCE);
        assert!((solver.flows()[3] - 2.).abs() < TOLERANCE);
    }
    #[test]
    fn does_match_brute_force_assignment() {
        use rand::Rng;
        use rand::SeedableRng;
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(0xE3D);
        const K: usize = 5;
        for _ in 0..32 {
            let costs = (0..K * K)
                .map(|_| rng.random_range(0.0..10.0))
                .collect::<Vec<Energy>>();
            let network = transport(&[1.; K], &[1.; K], &costs);
            let (status, solver) = solve(&network);
            assert_eq!(status, Status::Success);
            let best = permutations(K)
                .iter()
                .map(|p| p.iter().enumerate().map(|(i, &j)| costs[i * K + j]).sum())
                .fold(Energy::INFINITY, Energy::min);
            assert!(
                (solver.cost() - best).abs() < 1e-9,
                "{} != {}",
                solver.cost(),
                best
            );
        }
    }
    #[test]
    fn does_satisfy_complementary_slackness() {
        use rand::Rng;
        use rand::SeedableRng;
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let (r, c) = (7, 9);
        let supply = (0..r).map(|_| rng.random_range(0.1..1.0)).collect::<Vec<Mass>>();
        let total = supply.iter().sum::<Mass>();
        let demand = (0..c).map(|_| total / c as Mass).collect::<Vec<Mass>>();
        let costs = (0..r * c)
            .map(|_| rng.random_range(0.0..1.0))
            .collect::<Vec<Energy>>();
        let network = transport(&supply, &demand, &costs);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        let pi = solver.potentials();
        for e in 0..network.n_arcs() {
            let reduced = network.cost(e) + pi[network.source(e)] - pi[network.target(e)];
            assert!(reduced > -1e-9, "negative reduced cost {}", reduced);
            if solver.flows()[e] > 1e-12 {
                assert!(reduced.abs() < 1e-9, "flow on non-tight arc {}", reduced);
            }
        }
        for i in 0..r {
            let out = (0..c).map(|j| solver.flows()[i * c + j]).sum::<Mass>();
            assert!((out - supply[i]).abs() < 1e-9);
        }
        for j in 0..c {
            let into = (0..r).map(|i| solver.flows()[i * c + j]).sum::<Mass>();
            assert!((into - demand[j]).abs() < 1e-9);
        }
    }
    #[test]
    fn does_keep_tree_consistent_after_every_pivot() {
        use rand::Rng;
        use rand::SeedableRng;
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(0x7EE);
        let (r, c) = (9, 12);
        let supply = (0..r).map(|_| rng.random_range(0.1..1.0)).collect::<Vec<Mass>>();
        let total = supply.iter().sum::<Mass>();
        let demand = (0..c).map(|_| total / c as Mass).collect::<Vec<Mass>>();
        let costs = (0..r * c)
            .map(|_| rng.random_range(0.0..1.0))
            .collect::<Vec<Energy>>();
        let network = transport(&supply, &demand, &costs);
        let ref mut solver = NetworkSimplex::default();
        let (_, full) = solve(&network);
        for cap in 0..=full.iterations() {
            let limits = Limits {
                iterations: cap,
                ..Limits::default()
            };
            solver.solve(&network, &limits);
            assert_tree(solver);
        }
        assert!((solver.cost() - full.cost()).abs() < TOLERANCE);
    }
    #[test]
    fn does_respect_capacity() {
        let mut network = Network::default();
        let s = network.node(2.);
        let t = network.node(-2.);
        network.bounded(s, t, 1., 0., 1.);
        network.arc(s, t, 3.);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        assert!((solver.cost() - 4.).abs() < TOLERANCE);
        assert!((solver.flows()[0] - 1.).abs() < TOLERANCE);
        assert!((solver.flows()[1] - 1.).abs() < TOLERANCE);
    }
    #[test]
    fn does_respect_lower_bound() {
        let mut network = Network::default();
        let s = network.node(2.);
        let t = network.node(-2.);
        network.arc(s, t, 1.);
        network.bounded(s, t, 3., 1.5, Mass::INFINITY);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        assert!((solver.flows()[0] - 0.5).abs() < TOLERANCE);
        assert!((solver.flows()[1] - 1.5).abs() < TOLERANCE);
        assert!((solver.cost() - 5.).abs() < TOLERANCE);
    }
    #[test]
    fn does_route_through_transshipment() {
        // s → m → t is cheaper than s → t
        let mut network = Network::default();
        let s = network.node(1.);
        let m = network.node(0.);
        let t = network.node(-1.);
        network.arc(s, t, 5.);
        network.arc(s, m, 1.);
        network.arc(m, t, 1.);
        let (status, solver) = solve(&network);
        assert_eq!(status, Status::Success);
        assert!((solver.cost() - 2.).abs() < TOLERANCE);
        assert!(solver.flows()[0].abs() < TOLERANCE);
    }
    #[test]
    fn is_negative_cycle_unbounded() {
        let mut network = Network::default();
        let a = network.node(0.);
        let b = network.node(0.);
        network.arc(a, b, -1.);
        network.arc(b, a, 0.);
        let (status, _) = solve(&network);
        assert_eq!(status, Status::Unbounded);
    }
    #[test]
    fn is_undersized_capacity_infeasible() {
        let mut network = Network::default();
        let s = network.node(1.);
        let t = network.node(-1.);
        network.bounded(s, t, 1., 0., 0.5);
        let (status, _) = solve(&network);
        assert_eq!(status, Status::Infeasible);
    }
    #[test]
    fn is_inverted_bound_infeasible() {
        let mut network = Network::default();
        let s = network.node(1.);
        let t = network.node(-1.);
        network.bounded(s, t, 1., 2., 1.);
        let (status, _) = solve(&network);
        assert_eq!(status, Status::Infeasible);
    }
    #[test]
    fn is_unbalanced_supply_mismatch() {
        let network = transport(&[1.], &[0.5], &[1.]);
        let (status, _) = solve(&network);
        assert_eq!(status, Status::SupplyMismatch);
    }
    #[test]
    fn is_empty_network_empty() {
        let (status, _) = solve(&Network::default());
        assert_eq!(status, Status::Empty);
    }
    #[test]
    fn does_stop_at_iteration_cap() {
        let network = transport(&[1.; 3], &[1.; 3], &[1., 2., 3., 2., 1., 2., 3., 2., 1.]);
        let mut solver = NetworkSimplex::default();
        let limits = Limits {
            iterations: 1,
            ..Limits::default()
        };
        assert_eq!(solver.solve(&network, &limits), Status::MaxIterReached);
        assert_eq!(solver.solve(&network, &Limits::default()), Status::Success);
        assert!((solver.cost() - 3.).abs() < TOLERANCE);
    }
    #[test]
    fn does_reuse_buffers_across_solves() {
        let mut solver = NetworkSimplex::default();
        let big = transport(&[1.; 4], &[1.; 4], &[1.; 16]);
        let small = transport(&[2.], &[2.], &[0.25]);
        assert_eq!(solver.solve(&big, &Limits::default()), Status::Success);
        assert_eq!(solver.solve(&small, &Limits::default()), Status::Success);
        assert_eq!(solver.flows().len(), 1);
        assert!((solver.cost() - 0.5).abs() < TOLERANCE);
    }

    fn permutations(k: usize) -> Vec<Vec<usize>> {
        if k == 0 {
            return vec![vec![]];
        }
        permutations(k - 1)
            .into_iter()
            .flat_map(|p| {
                (0..k).map(move |slot| {
                    let mut q = p.clone();
                    q.insert(slot, k - 1);
                    q
                })
            })
            .collect()
    }
}
