use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::order::VarOrder;
use crate::reference::Ref;

/// Renders the shared DAG reachable from `roots` in Graphviz DOT format.
///
/// Terminals are squares in a sink rank; each variable level is a rank of
/// its own; high edges are solid and low edges dashed.
pub fn to_dot(bdd: &Bdd, order: &VarOrder, roots: &[Ref]) -> Result<String, std::fmt::Error> {
    let mut dot = String::new();
    writeln!(dot, "graph {{")?;
    writeln!(dot, "node [shape=circle, fixedsize=true];")?;

    writeln!(dot, "{{ rank=sink")?;
    writeln!(dot, "{} [shape=square, label=\"0\"];", bdd.zero.index())?;
    writeln!(dot, "{} [shape=square, label=\"1\"];", bdd.one.index())?;
    writeln!(dot, "}}")?;

    let all_nodes = bdd.descendants(roots.iter().copied());

    // Nodes per level
    let mut levels = BTreeMap::<usize, Vec<Ref>>::new();
    for &f in all_nodes.iter() {
        if bdd.is_terminal(f) {
            continue;
        }
        levels.entry(bdd.node_level(f)).or_default().push(f);
    }
    for level in levels.values() {
        writeln!(dot, "{{ rank=same")?;
        for &f in level.iter() {
            let name = order.name(bdd.variable(f));
            writeln!(dot, "{} [label=\"{}\"];", f.index(), name)?;
        }
        writeln!(dot, "}}")?;
    }

    // Edges
    for &f in all_nodes.iter() {
        if bdd.is_terminal(f) {
            continue;
        }
        writeln!(dot, "{} -- {};", f.index(), bdd.high(f).index())?;
        writeln!(dot, "{} -- {} [style=dashed];", f.index(), bdd.low(f).index())?;
    }

    // Roots
    writeln!(dot, "{{ rank=source")?;
    for (i, root) in roots.iter().enumerate() {
        writeln!(dot, "r{} [shape=rect, label=\"{}\"];", i, root)?;
    }
    writeln!(dot, "}}")?;
    for (i, &root) in roots.iter().enumerate() {
        writeln!(dot, "r{} -- {};", i, root.index())?;
    }

    writeln!(dot, "}}")?;
    Ok(dot)
}
