//! # netbdd: ROBDD compilation for combinational netlists
//!
//! **`netbdd`** builds a **Reduced Ordered Binary Decision Diagram (ROBDD)**
//! for the Boolean function computed by a small gate-level netlist, then
//! shrinks the diagram by reordering the input variables with the sifting
//! heuristic.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a Boolean function as a shared DAG
//! of decision nodes. Kept *reduced* and *ordered*, it is **canonical**: for
//! a fixed variable order, every Boolean function has exactly one
//! representation, which makes equivalence and satisfiability checks
//! constant-time once the diagram is built.
//!
//! ## Key pieces
//!
//! - **Hash-consed kernel**: all nodes go through the [`Bdd`][crate::bdd::Bdd]
//!   manager, whose unique table guarantees the canonical form, and whose
//!   [`apply`][crate::bdd::Bdd::apply] combinator lifts any binary Boolean
//!   operator to diagrams.
//! - **Circuit compiler**: [`compile`][crate::compile::compile] evaluates a
//!   parsed netlist topologically, binding every signal to a diagram.
//! - **Sifting driver**: [`sift`][crate::reorder::sift] walks each variable
//!   through all positions of the order, rebuilding and measuring, and keeps
//!   the best position found.
//!
//! ## Basic usage
//!
//! ```rust
//! use netbdd::rebuild::Session;
//! use netbdd::reorder;
//!
//! let source = "\
//!     input a, b;
//!     output y;
//!     and g(y, a, b);
//!     endmodule";
//!
//! let mut session = Session::new(source);
//! let (root, stats) = reorder::sift(&mut session);
//! assert_eq!(session.bdd().size(root), 4);
//! assert!(stats.final_size <= stats.initial_size);
//! ```
//!
//! The `netbdd` binary wires this up to stdin and prints the final diagram
//! as a tree.

pub mod bdd;
pub mod cache;
pub mod compile;
pub mod dot;
pub mod netlist;
pub mod node;
pub mod op;
pub mod order;
pub mod rebuild;
pub mod reference;
pub mod reorder;
pub mod tree;
pub mod types;
pub mod utils;
