use hashbrown::HashMap;
use log::{debug, warn};

use crate::bdd::Bdd;
use crate::netlist::{Gate, Netlist};
use crate::op::GateOp;
use crate::order::VarOrder;
use crate::reference::Ref;

/// Compiles `netlist` into a BDD under the current order.
///
/// Binds every input to its single-variable function, then evaluates gates
/// topologically: each scan over the gate list evaluates every gate whose
/// inputs are all bound. When a scan makes no progress the remaining gates
/// are cyclic or reference missing signals; they are reported and then
/// evaluated best-effort, with unbound inputs read as constant false.
///
/// Returns the binding of the first output, or the false terminal when the
/// netlist has no outputs or the first output is never driven.
pub fn compile(bdd: &mut Bdd, order: &VarOrder, netlist: &Netlist) -> Ref {
    let mut signals: HashMap<String, Ref> = HashMap::new();

    for name in &netlist.inputs {
        match order.lookup(name) {
            Some(v) => {
                let f = bdd.mk_var(v);
                signals.insert(name.clone(), f);
            }
            None => warn!("input '{}' is not in the variable order", name),
        }
    }

    let mut produced = vec![false; netlist.gates.len()];
    let mut remaining = netlist.gates.len();

    while remaining > 0 {
        let mut progress = false;
        for (i, gate) in netlist.gates.iter().enumerate() {
            if produced[i] {
                continue;
            }
            if !gate.inputs.iter().all(|s| signals.contains_key(s.as_str())) {
                continue;
            }
            let f = eval_gate(bdd, gate, &signals);
            debug!("gate '{}' ({}) -> {}", gate.output, gate.ty, f);
            signals.insert(gate.output.clone(), f);
            produced[i] = true;
            remaining -= 1;
            progress = true;
        }
        if !progress {
            break;
        }
    }

    if remaining > 0 {
        let stuck: Vec<&str> = netlist
            .gates
            .iter()
            .enumerate()
            .filter(|(i, _)| !produced[*i])
            .map(|(_, g)| g.output.as_str())
            .collect();
        warn!(
            "{} gate(s) form a cycle or reference missing signals ({}); \
             evaluating them with unbound inputs as 0",
            remaining,
            stuck.join(", ")
        );
        for (i, gate) in netlist.gates.iter().enumerate() {
            if produced[i] {
                continue;
            }
            let f = eval_gate(bdd, gate, &signals);
            signals.insert(gate.output.clone(), f);
            produced[i] = true;
        }
    }

    match netlist.outputs.first() {
        Some(out) => signals.get(out.as_str()).copied().unwrap_or_else(|| {
            warn!("output '{}' is never driven; result is constant 0", out);
            bdd.zero
        }),
        None => {
            warn!("netlist has no outputs; result is constant 0");
            bdd.zero
        }
    }
}

fn eval_gate(bdd: &mut Bdd, gate: &Gate, signals: &HashMap<String, Ref>) -> Ref {
    let zero = bdd.zero;

    let mut operands = Vec::with_capacity(gate.inputs.len());
    for name in &gate.inputs {
        match signals.get(name.as_str()) {
            Some(&f) => operands.push(f),
            None => {
                warn!(
                    "gate '{}' input '{}' is unbound; substituting 0",
                    gate.output, name
                );
                operands.push(zero);
            }
        }
    }

    match GateOp::parse(&gate.ty) {
        None => {
            warn!(
                "unknown gate type '{}' for '{}'; result is constant 0",
                gate.ty, gate.output
            );
            zero
        }
        Some(GateOp::Not) => match operands.split_first() {
            Some((&a, rest)) => {
                if !rest.is_empty() {
                    warn!(
                        "not gate '{}' has {} inputs; using the first",
                        gate.output,
                        operands.len()
                    );
                }
                bdd.apply_not(a)
            }
            None => {
                warn!("not gate '{}' has no inputs; result is constant 0", gate.output);
                zero
            }
        },
        Some(GateOp::Binary(op)) => match operands.split_first() {
            Some((&first, rest)) => {
                let mut acc = first;
                for &f in rest {
                    acc = bdd.apply(acc, f, op);
                }
                acc
            }
            None => {
                warn!(
                    "{} gate '{}' has no inputs; result is constant 0",
                    gate.ty, gate.output
                );
                zero
            }
        },
    }
}
