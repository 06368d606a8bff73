use log::debug;

use crate::bdd::{Bdd, BddConfig};
use crate::compile::compile;
use crate::netlist::Netlist;
use crate::order::VarOrder;
use crate::reference::Ref;

/// Owns a netlist source together with the kernel and variable order built
/// from it, and is the only component that resets the kernel.
///
/// Each [`rebuild`][Session::rebuild] reparses the source, clears the kernel
/// (invalidating every previously returned [`Ref`]) and recompiles under the
/// current order. The order is taken from the netlist input list on the
/// first rebuild only; afterwards the reorder driver's mutations survive
/// every rebuild.
pub struct Session {
    source: String,
    bdd: Bdd,
    order: VarOrder,
    first: bool,
}

impl Session {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_config(source, BddConfig::default())
    }

    pub fn with_config(source: impl Into<String>, config: BddConfig) -> Self {
        Self {
            source: source.into(),
            bdd: Bdd::new(config),
            order: VarOrder::new(),
            first: true,
        }
    }

    /// Discards all nodes and compiles the netlist afresh under the current
    /// order, returning the new root.
    pub fn rebuild(&mut self) -> Ref {
        let netlist = Netlist::parse(&self.source);

        if self.first {
            for name in &netlist.inputs {
                self.order.append(name);
            }
            self.first = false;
            debug!("initial variable order set from {} inputs", self.order.len());
        }

        self.bdd.reset(&self.order);
        compile(&mut self.bdd, &self.order, &netlist)
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn order(&self) -> &VarOrder {
        &self.order
    }

    pub(crate) fn order_mut(&mut self) -> &mut VarOrder {
        &mut self.order
    }
}
