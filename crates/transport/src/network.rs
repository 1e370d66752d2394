use wass_core::Energy;
use wass_core::Mass;

/// A directed flow network stored as an arena of dense indices.
///
/// Nodes carry a supply (positive) or demand (negative). Arcs carry a cost
/// per unit of flow and lower/upper bounds on that flow. An upper bound of
/// [`Mass::INFINITY`] marks an uncapacitated arc.
///
/// Buffers are kept across [`Network::clear`] so the same network can be
/// rebuilt for many problems without reallocating.
#[derive(Debug, Clone, Default)]
pub struct Network {
    supply: Vec<Mass>,
    source: Vec<usize>,
    target: Vec<usize>,
    cost: Vec<Energy>,
    lower: Vec<Mass>,
    upper: Vec<Mass>,
}

impl Network {
    pub fn with_capacity(nodes: usize, arcs: usize) -> Self {
        Self {
            supply: Vec::with_capacity(nodes),
            source: Vec::with_capacity(arcs),
            target: Vec::with_capacity(arcs),
            cost: Vec::with_capacity(arcs),
            lower: Vec::with_capacity(arcs),
            upper: Vec::with_capacity(arcs),
        }
    }
    /// Removes all nodes and arcs, keeping allocations.
    pub fn clear(&mut self) {
        self.supply.clear();
        self.source.clear();
        self.target.clear();
        self.cost.clear();
        self.lower.clear();
        self.upper.clear();
    }
    /// Adds a node with the given supply and returns its index.
    pub fn node(&mut self, supply: Mass) -> usize {
        self.supply.push(supply);
        self.supply.len() - 1
    }
    /// Adds an uncapacitated arc and returns its index.
    pub fn arc(&mut self, source: usize, target: usize, cost: Energy) -> usize {
        self.bounded(source, target, cost, 0., Mass::INFINITY)
    }
    /// Adds an arc whose flow must lie in `[lower, upper]` and returns its index.
    pub fn bounded(
        &mut self,
        source: usize,
        target: usize,
        cost: Energy,
        lower: Mass,
        upper: Mass,
    ) -> usize {
        debug_assert!(source < self.n_nodes(), "arc source out of range");
        debug_assert!(target < self.n_nodes(), "arc target out of range");
        self.source.push(source);
        self.target.push(target);
        self.cost.push(cost);
        self.lower.push(lower);
        self.upper.push(upper);
        self.source.len() - 1
    }
    pub fn n_nodes(&self) -> usize {
        self.supply.len()
    }
    pub fn n_arcs(&self) -> usize {
        self.source.len()
    }
    pub fn supply(&self, u: usize) -> Mass {
        self.supply[u]
    }
    pub fn source(&self, e: usize) -> usize {
        self.source[e]
    }
    pub fn target(&self, e: usize) -> usize {
        self.target[e]
    }
    pub fn cost(&self, e: usize) -> Energy {
        self.cost[e]
    }
    pub fn lower(&self, e: usize) -> Mass {
        self.lower[e]
    }
    pub fn upper(&self, e: usize) -> Mass {
        self.upper[e]
    }
    /// Sum of all supplies. Zero for a balanced network.
    pub fn imbalance(&self) -> Mass {
        self.supply.iter().sum()
    }
}
