use std::collections::HashMap;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use netbdd::rebuild::Session;
use netbdd::reference::Ref;
use netbdd::reorder;
use netbdd::tree;

fn evaluate(session: &Session, root: Ref, inputs: &[(&str, bool)]) -> bool {
    let values: HashMap<_, _> = inputs
        .iter()
        .map(|&(name, value)| (session.order().lookup(name).unwrap(), value))
        .collect();
    session.bdd().evaluate(root, &values)
}

#[test]
fn single_and_after_sift() {
    let mut session = Session::new(
        "input a, b;\n\
         output y;\n\
         and g(y, a, b);\n\
         endmodule\n",
    );
    let (root, _) = reorder::sift(&mut session);

    let bdd = session.bdd();
    assert_eq!(bdd.size(root), 4);

    // Root branches on the first variable: low is 0, high is the node for
    // the second variable, which branches to the terminals.
    assert_eq!(bdd.low(root), bdd.zero);
    let second = bdd.high(root);
    assert_eq!(bdd.low(second), bdd.zero);
    assert_eq!(bdd.high(second), bdd.one);
}

#[test]
fn xor_canonicalization() {
    let direct = "input a, b;\n\
                  output y;\n\
                  xor g(y, a, b);\n\
                  endmodule\n";
    let expanded = "input a, b;\n\
                    output y;\n\
                    wire na, nb, t1, t2;\n\
                    not g1(na, a);\n\
                    not g2(nb, b);\n\
                    and g3(t1, a, nb);\n\
                    and g4(t2, na, b);\n\
                    or g5(y, t1, t2);\n\
                    endmodule\n";

    let mut s1 = Session::new(direct);
    let r1 = s1.rebuild();
    let mut s2 = Session::new(expanded);
    let r2 = s2.rebuild();

    assert_eq!(s1.bdd().size(r1), s2.bdd().size(r2));
    assert_eq!(
        tree::tree_string(s1.bdd(), s1.order(), r1),
        tree::tree_string(s2.bdd(), s2.order(), r2)
    );
}

#[test]
fn sifting_improves_bad_order() {
    let source = "input a1, a2, a3, b1, b2, b3;\n\
                  output y;\n\
                  and g1(t1, a1, b1);\n\
                  and g2(t2, a2, b2);\n\
                  and g3(t3, a3, b3);\n\
                  or g4(t4, t1, t2);\n\
                  or g5(y, t4, t3);\n\
                  endmodule\n";
    let names = ["a1", "a2", "a3", "b1", "b2", "b3"];

    let reference = |inputs: &[(&str, bool)]| {
        let v = |name: &str| inputs.iter().find(|(n, _)| *n == name).unwrap().1;
        (v("a1") && v("b1")) || (v("a2") && v("b2")) || (v("a3") && v("b3"))
    };

    let mut session = Session::new(source);
    let before = session.rebuild();
    let size_before = session.bdd().size(before);
    for bits in 0..64u32 {
        let inputs: Vec<(&str, bool)> = names
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, bits & (1 << i) != 0))
            .collect();
        assert_eq!(evaluate(&session, before, &inputs), reference(&inputs));
    }

    let (after, stats) = reorder::sift(&mut session);
    let size_after = session.bdd().size(after);

    assert!(size_after < size_before);
    assert_eq!(stats.initial_size, size_before);
    assert_eq!(stats.final_size, size_after);

    for bits in 0..64u32 {
        let inputs: Vec<(&str, bool)> = names
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, bits & (1 << i) != 0))
            .collect();
        assert_eq!(evaluate(&session, after, &inputs), reference(&inputs));
    }
}

#[test]
fn xor_self_constant_folds() {
    let mut session = Session::new(
        "input a;\n\
         output y;\n\
         xor g(y, a, a);\n\
         endmodule\n",
    );
    let (root, _) = reorder::sift(&mut session);
    assert!(session.bdd().is_zero(root));
    assert_eq!(
        tree::tree_string(session.bdd(), session.order(), root),
        "0\n"
    );
}

#[test]
fn not_at_output() {
    let mut session = Session::new(
        "input a;\n\
         output y;\n\
         not g(y, a);\n\
         endmodule\n",
    );
    let (root, _) = reorder::sift(&mut session);
    let bdd = session.bdd();
    assert_eq!(bdd.low(root), bdd.one);
    assert_eq!(bdd.high(root), bdd.zero);
}

#[test]
fn cyclic_netlist_terminates() {
    let mut session = Session::new(
        "input a, b;\n\
         output y;\n\
         and g1(w1, w2, a);\n\
         and g2(w2, w1, b);\n\
         or g3(y, w1, w2);\n\
         endmodule\n",
    );
    let (root, stats) = reorder::sift(&mut session);
    assert!(session.bdd().is_zero(root));
    assert!(stats.rebuilds > 0);
}

/// A random combinational netlist, topological by construction, paired with
/// direct gate-level evaluation over the same source.
struct RandomCircuit {
    source: String,
    inputs: Vec<String>,
    gates: Vec<(String, String, Vec<String>)>,
    output: String,
}

impl RandomCircuit {
    fn generate(rng: &mut ChaCha8Rng, num_inputs: usize, num_gates: usize) -> Self {
        let inputs: Vec<String> = (0..num_inputs).map(|i| format!("i{}", i)).collect();
        let mut signals = inputs.clone();
        let mut gates = Vec::new();

        for g in 0..num_gates {
            let ty = ["and", "or", "xor", "nand", "nor", "not"]
                .choose(rng)
                .unwrap()
                .to_string();
            let arity = if ty == "not" { 1 } else { rng.gen_range(2..=3) };
            let ins: Vec<String> = (0..arity)
                .map(|_| signals.choose(rng).unwrap().clone())
                .collect();
            let out = format!("w{}", g);
            signals.push(out.clone());
            gates.push((ty, out, ins));
        }

        let output = signals.last().unwrap().clone();
        let mut source = format!("input {};\noutput {};\n", inputs.join(", "), output);
        for (ty, out, ins) in &gates {
            source.push_str(&format!("{} g_{}({}, {});\n", ty, out, out, ins.join(", ")));
        }
        source.push_str("endmodule\n");

        Self {
            source,
            inputs,
            gates,
            output,
        }
    }

    fn eval_direct(&self, assignment: &HashMap<String, bool>) -> bool {
        let mut values = assignment.clone();
        for (ty, out, ins) in &self.gates {
            let bits: Vec<bool> = ins.iter().map(|s| values[s.as_str()]).collect();
            let value = match ty.as_str() {
                "not" => !bits[0],
                "and" => bits.iter().all(|&b| b),
                "or" => bits.iter().any(|&b| b),
                "xor" => bits.iter().fold(false, |acc, &b| acc ^ b),
                "nand" => {
                    let mut acc = bits[0];
                    for &b in &bits[1..] {
                        acc = !(acc && b);
                    }
                    acc
                }
                "nor" => {
                    let mut acc = bits[0];
                    for &b in &bits[1..] {
                        acc = !(acc || b);
                    }
                    acc
                }
                _ => unreachable!(),
            };
            values.insert(out.clone(), value);
        }
        values[self.output.as_str()]
    }
}

#[test]
fn random_circuits_match_direct_evaluation() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xbdd);

    for _ in 0..30 {
        let circuit = RandomCircuit::generate(&mut rng, 4, 8);
        let mut session = Session::new(circuit.source.clone());

        let (after, stats) = reorder::sift(&mut session);
        assert!(stats.final_size <= stats.initial_size, "{}", circuit.source);

        for bits in 0..16u32 {
            let assignment: HashMap<String, bool> = circuit
                .inputs
                .iter()
                .enumerate()
                .map(|(i, n)| (n.clone(), bits & (1 << i) != 0))
                .collect();
            let expected = circuit.eval_direct(&assignment);

            let pairs: Vec<(&str, bool)> = circuit
                .inputs
                .iter()
                .map(|n| (n.as_str(), assignment[n.as_str()]))
                .collect();
            assert_eq!(
                evaluate(&session, after, &pairs),
                expected,
                "assignment {:#06b} of\n{}",
                bits,
                circuit.source
            );
        }
    }
}
