use std::fmt::{Display, Formatter};

/// A binary Boolean operator liftable to BDDs via
/// [`apply`][crate::bdd::Bdd::apply].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Op {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl Op {
    /// The operator's truth table.
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
            Op::Xor => a ^ b,
            Op::Nand => !(a && b),
            Op::Nor => !(a || b),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Op::And => "and",
            Op::Or => "or",
            Op::Xor => "xor",
            Op::Nand => "nand",
            Op::Nor => "nor",
        };
        write!(f, "{}", s)
    }
}

/// A recognized gate type from the netlist surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GateOp {
    Not,
    Binary(Op),
}

impl GateOp {
    /// Resolves a gate type string, case-insensitively.
    ///
    /// Returns `None` for unrecognized types; the compiler decides what to do
    /// with those.
    pub fn parse(ty: &str) -> Option<GateOp> {
        match ty.to_ascii_lowercase().as_str() {
            "not" => Some(GateOp::Not),
            "and" => Some(GateOp::Binary(Op::And)),
            "or" => Some(GateOp::Binary(Op::Or)),
            "xor" => Some(GateOp::Binary(Op::Xor)),
            "nand" => Some(GateOp::Binary(Op::Nand)),
            "nor" => Some(GateOp::Binary(Op::Nor)),
            _ => None,
        }
    }
}
