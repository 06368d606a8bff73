use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::order::VarOrder;
use crate::reference::Ref;

/// Renders a diagram as an indented tree.
///
/// Depth-first preorder with the low child before the high child. Internal
/// nodes print their variable name, terminals print `0` or `1`. Shared
/// subgraphs are printed once per occurrence.
pub fn tree_string(bdd: &Bdd, order: &VarOrder, root: Ref) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", label(bdd, order, root));
    if !bdd.is_terminal(root) {
        write_child(bdd, order, bdd.low(root), "", false, &mut out);
        write_child(bdd, order, bdd.high(root), "", true, &mut out);
    }
    out
}

fn label<'a>(bdd: &Bdd, order: &'a VarOrder, f: Ref) -> &'a str {
    if bdd.is_zero(f) {
        "0"
    } else if bdd.is_one(f) {
        "1"
    } else {
        order.name(bdd.variable(f))
    }
}

fn write_child(bdd: &Bdd, order: &VarOrder, f: Ref, prefix: &str, last: bool, out: &mut String) {
    let branch = if last { "└── " } else { "├── " };
    let _ = writeln!(out, "{}{}{}", prefix, branch, label(bdd, order, f));

    if !bdd.is_terminal(f) {
        let extended = format!("{}{}", prefix, if last { "    " } else { "│   " });
        write_child(bdd, order, bdd.low(f), &extended, false, out);
        write_child(bdd, order, bdd.high(f), &extended, true, out);
    }
}
