use std::collections::HashMap as StdHashMap;
use std::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::cache::{CacheStats, OpCache};
use crate::node::Node;
use crate::op::Op;
use crate::order::VarOrder;
use crate::reference::Ref;
use crate::types::Var;

/// Level reported for terminals: strictly greater than any variable level.
pub const TERMINAL_LEVEL: usize = usize::MAX;

/// Kernel tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct BddConfig {
    /// Operation caches hold `2^cache_bits` entries each.
    pub cache_bits: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self { cache_bits: 16 }
    }
}

/// The BDD kernel: node table, unique table, operation caches and terminals.
///
/// All nodes are created through [`mk_node`][Bdd::mk_node], which maintains
/// the reduction invariants, so distinct [`Ref`]s always denote distinct
/// Boolean functions under the current order. The kernel snapshots the
/// variable order's level map at [`reset`][Bdd::reset]; the order must not be
/// mutated between a reset and the last use of the nodes built under it.
pub struct Bdd {
    config: BddConfig,
    nodes: Vec<Node>,
    unique: HashMap<(Var, Ref, Ref), Ref>,
    apply_cache: OpCache<(Ref, Ref, Op)>,
    not_cache: OpCache<Ref>,
    /// `Var` id to position in the order; `TERMINAL_LEVEL` for unknown ids.
    levels: Vec<usize>,
    pub zero: Ref,
    pub one: Ref,
}

impl Bdd {
    pub fn new(config: BddConfig) -> Self {
        let mut bdd = Self {
            config,
            nodes: Vec::new(),
            unique: HashMap::new(),
            apply_cache: OpCache::new(config.cache_bits),
            not_cache: OpCache::new(config.cache_bits),
            levels: Vec::new(),
            zero: Ref::new(0),
            one: Ref::new(1),
        };
        bdd.reset(&VarOrder::new());
        bdd
    }

    /// Invalidates every node and starts over under `order`.
    ///
    /// Clears the node table, the unique table and both operation caches,
    /// re-creates the terminals and snapshots `order`'s level map. Every
    /// previously issued [`Ref`] is invalid afterwards.
    pub fn reset(&mut self, order: &VarOrder) {
        self.nodes.clear();
        self.unique.clear();
        self.apply_cache.clear();
        self.not_cache.clear();

        self.zero = Ref::new(0);
        self.nodes.push(Node::terminal(self.zero));
        self.one = Ref::new(1);
        self.nodes.push(Node::terminal(self.one));

        self.levels = vec![TERMINAL_LEVEL; order.len() + 1];
        for (i, v) in order.iter().enumerate() {
            self.levels[v.id() as usize] = i;
        }

        debug!("reset: {} variables", order.len());
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("num_nodes", &self.num_nodes())
            .field("cache_bits", &self.config.cache_bits)
            .finish()
    }
}

impl Bdd {
    pub fn is_zero(&self, f: Ref) -> bool {
        f == self.zero
    }
    pub fn is_one(&self, f: Ref) -> bool {
        f == self.one
    }
    pub fn is_terminal(&self, f: Ref) -> bool {
        self.is_zero(f) || self.is_one(f)
    }

    /// The Boolean value of a terminal. Defined only on terminals.
    pub fn terminal_value(&self, f: Ref) -> bool {
        debug_assert!(self.is_terminal(f));
        f == self.one
    }

    /// The terminal representing `value`.
    pub fn constant(&self, value: bool) -> Ref {
        if value {
            self.one
        } else {
            self.zero
        }
    }

    pub fn variable(&self, f: Ref) -> Var {
        self.nodes[f.index()].var
    }
    pub fn low(&self, f: Ref) -> Ref {
        debug_assert!(!self.is_terminal(f));
        self.nodes[f.index()].low
    }
    pub fn high(&self, f: Ref) -> Ref {
        debug_assert!(!self.is_terminal(f));
        self.nodes[f.index()].high
    }

    /// Position of `v` in the order snapshotted at the last reset.
    pub fn level(&self, v: Var) -> usize {
        self.levels
            .get(v.id() as usize)
            .copied()
            .unwrap_or(TERMINAL_LEVEL)
    }

    /// The level a node branches at; `TERMINAL_LEVEL` for terminals.
    pub fn node_level(&self, f: Ref) -> usize {
        if self.is_terminal(f) {
            TERMINAL_LEVEL
        } else {
            self.level(self.variable(f))
        }
    }

    /// Number of nodes created since the last reset, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Combined lookup totals of the apply and negation caches, accumulated
    /// over the kernel's lifetime.
    pub fn cache_stats(&self) -> CacheStats {
        let apply = self.apply_cache.stats();
        let not = self.not_cache.stats();
        CacheStats {
            hits: apply.hits + not.hits,
            misses: apply.misses + not.misses,
        }
    }

    /// All handles issued since the last reset, in creation order.
    pub fn refs(&self) -> impl Iterator<Item = Ref> + '_ {
        (0..self.nodes.len()).map(|i| Ref::new(i as u32))
    }

    /// The sole internal-node constructor.
    ///
    /// Returns `low` when `low == high` and the interned node for a known
    /// `(v, low, high)` triple, so the result is always reduced.
    ///
    /// Callers must keep the ordering invariant: any non-terminal child has
    /// to branch at a strictly greater level than `v`. The kernel only
    /// checks this in debug builds.
    pub fn mk_node(&mut self, v: Var, low: Ref, high: Ref) -> Ref {
        debug!("mk_node(v = {}, low = {}, high = {})", v, low, high);

        if low == high {
            return low;
        }

        debug_assert!(self.level(v) < self.node_level(low));
        debug_assert!(self.level(v) < self.node_level(high));

        if let Some(&f) = self.unique.get(&(v, low, high)) {
            debug!("mk_node: node {} already exists", f);
            return f;
        }

        let f = Ref::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(v, low, high));
        self.unique.insert((v, low, high), f);
        debug!("mk_node: created new node {}", f);
        f
    }

    /// The single-variable function `v`.
    pub fn mk_var(&mut self, v: Var) -> Ref {
        self.mk_node(v, self.zero, self.one)
    }

    /// Lifts the binary operator `op` to BDDs by Shannon expansion over the
    /// topmost variable of the two operands.
    pub fn apply(&mut self, f: Ref, g: Ref, op: Op) -> Ref {
        debug!("apply(f = {}, g = {}, op = {})", f, g, op);

        if self.is_terminal(f) && self.is_terminal(g) {
            return self.constant(op.eval(self.terminal_value(f), self.terminal_value(g)));
        }

        let key = (f, g, op);
        if let Some(res) = self.apply_cache.get(&key) {
            debug!("cache: apply(f = {}, g = {}, op = {}) -> {}", f, g, op, res);
            return res;
        }

        let fl = self.node_level(f);
        let gl = self.node_level(g);
        let v = if fl <= gl {
            self.variable(f)
        } else {
            self.variable(g)
        };
        let level = fl.min(gl);

        let (f0, f1) = if fl == level {
            (self.low(f), self.high(f))
        } else {
            (f, f)
        };
        let (g0, g1) = if gl == level {
            (self.low(g), self.high(g))
        } else {
            (g, g)
        };

        let low = self.apply(f0, g0, op);
        let high = self.apply(f1, g1, op);
        let res = self.mk_node(v, low, high);

        self.apply_cache.insert(key, res);
        res
    }

    /// The BDD of `¬f`.
    ///
    /// Complementation preserves the variable order, so internal nodes just
    /// recurse on both children and reassemble with the same variable.
    pub fn apply_not(&mut self, f: Ref) -> Ref {
        if self.is_terminal(f) {
            return self.constant(!self.terminal_value(f));
        }

        if let Some(res) = self.not_cache.get(&f) {
            return res;
        }

        let v = self.variable(f);
        let (f0, f1) = (self.low(f), self.high(f));
        let low = self.apply_not(f0);
        let high = self.apply_not(f1);
        let res = self.mk_node(v, low, high);

        self.not_cache.insert(f, res);
        res
    }

    /// All nodes reachable from `roots`, terminals included.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> Vec<Ref> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();
        let mut stack: Vec<Ref> = roots.into_iter().collect();

        while let Some(f) = stack.pop() {
            if visited.insert(f) {
                result.push(f);
                if !self.is_terminal(f) {
                    let node = &self.nodes[f.index()];
                    stack.push(node.low);
                    stack.push(node.high);
                }
            }
        }

        result
    }

    /// The diagram size of `f`: reachable nodes, terminals included.
    pub fn size(&self, f: Ref) -> usize {
        self.descendants([f]).len()
    }

    /// Evaluates `f` under an assignment. Unassigned variables read as false.
    pub fn evaluate(&self, f: Ref, values: &StdHashMap<Var, bool>) -> bool {
        let mut f = f;
        while !self.is_terminal(f) {
            let node = self.nodes[f.index()];
            f = if values.get(&node.var).copied().unwrap_or(false) {
                node.high
            } else {
                node.low
            };
        }
        self.terminal_value(f)
    }

    /// Compact single-line structural rendering, for logs and tests.
    pub fn to_bracket_string(&self, f: Ref) -> String {
        if self.is_zero(f) {
            return format!("{}:(0)", f);
        } else if self.is_one(f) {
            return format!("{}:(1)", f);
        }

        format!(
            "{}:({}, {}, {})",
            f,
            self.variable(f),
            self.to_bracket_string(self.low(f)),
            self.to_bracket_string(self.high(f))
        )
    }
}
