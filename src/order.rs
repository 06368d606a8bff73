use hashbrown::HashMap;

use crate::types::Var;

/// The total order over input variables.
///
/// Interns variable names to dense [`Var`] ids and keeps the ordered sequence
/// together with its reverse index (variable to position). Ids are stable
/// across permutations; positions are not. Every mutation rebuilds the
/// reverse index from the sequence.
///
/// The order is established from the netlist input list on the first rebuild
/// and is afterwards mutated only by the reorder driver.
#[derive(Debug, Default, Clone)]
pub struct VarOrder {
    names: Vec<String>,
    ids: HashMap<String, Var>,
    order: Vec<Var>,
    pos: HashMap<Var, usize>,
}

impl VarOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name` and appends its variable to the end of the order.
    ///
    /// Re-appending a known name is a no-op that returns the existing id.
    pub fn append(&mut self, name: &str) -> Var {
        if let Some(&v) = self.ids.get(name) {
            return v;
        }
        self.names.push(name.to_string());
        let v = Var::new(self.names.len() as u32);
        self.ids.insert(name.to_string(), v);
        self.pos.insert(v, self.order.len());
        self.order.push(v);
        v
    }

    /// Looks up the variable interned for `name`.
    pub fn lookup(&self, name: &str) -> Option<Var> {
        self.ids.get(name).copied()
    }

    /// The name a variable was interned from.
    pub fn name(&self, v: Var) -> &str {
        &self.names[(v.id() - 1) as usize]
    }

    /// Number of variables in the order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The variable at position `i`.
    pub fn var_at(&self, i: usize) -> Var {
        self.order[i]
    }

    /// The position of `v` in the order.
    pub fn index_of(&self, v: Var) -> usize {
        self.pos[&v]
    }

    pub fn iter(&self) -> impl Iterator<Item = Var> + '_ {
        self.order.iter().copied()
    }

    /// A copy of the current sequence, suitable for [`set_order`][Self::set_order].
    pub fn snapshot(&self) -> Vec<Var> {
        self.order.clone()
    }

    /// Replaces the sequence wholesale.
    ///
    /// `order` must be a permutation of the interned variables.
    pub fn set_order(&mut self, order: Vec<Var>) {
        debug_assert_eq!(order.len(), self.names.len());
        self.order = order;
        self.rebuild_index();
    }

    /// Swaps the variables at positions `i` and `i + 1`.
    pub fn swap_adjacent(&mut self, i: usize) {
        self.order.swap(i, i + 1);
        self.rebuild_index();
    }

    /// Removes the variable at position `from` and reinserts it at `to`.
    pub fn move_var(&mut self, from: usize, to: usize) {
        let v = self.order.remove(from);
        self.order.insert(to, v);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.pos.clear();
        for (i, &v) in self.order.iter().enumerate() {
            self.pos.insert(v, i);
        }
    }
}
