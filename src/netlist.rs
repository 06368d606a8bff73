use hashbrown::HashSet;
use log::warn;

/// A gate statement: `TYPE [instance] (output, input, ...)`.
///
/// The type string is kept verbatim; the compiler resolves it
/// case-insensitively and decides what an unrecognized type means.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Gate {
    pub ty: String,
    pub output: String,
    pub inputs: Vec<String>,
}

/// The in-memory netlist: a passive record filled by [`Netlist::parse`].
///
/// The input list order is the parse order and determines the initial
/// variable order.
#[derive(Debug, Default, Clone)]
pub struct Netlist {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub wires: Vec<String>,
    pub regs: Vec<String>,
    pub gates: Vec<Gate>,
}

impl Netlist {
    /// Parses a line-oriented netlist description.
    ///
    /// One statement per line; `//` comments run to end of line; blank lines
    /// are skipped; a line whose first token is `endmodule` ends the source.
    /// Statements that match no recognized shape are skipped with a
    /// diagnostic. Parsing never fails.
    pub fn parse(source: &str) -> Netlist {
        let mut netlist = Netlist::default();
        let mut driven = HashSet::new();

        for raw in source.lines() {
            let line = match raw.find("//") {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let keyword = line
                .split(|c: char| c.is_whitespace() || c == '(')
                .next()
                .unwrap_or("");
            match keyword {
                "endmodule" => break,
                "input" => append_idents(&line[keyword.len()..], &mut netlist.inputs),
                "output" => append_idents(&line[keyword.len()..], &mut netlist.outputs),
                "wire" => append_idents(&line[keyword.len()..], &mut netlist.wires),
                "reg" => append_idents(&line[keyword.len()..], &mut netlist.regs),
                // A module header carries a parenthesized port list; it is a
                // declaration, not a gate.
                "module" => {}
                _ if line.contains('(') && line.contains(')') => match parse_gate(line) {
                    Some(gate) => {
                        if !driven.insert(gate.output.clone()) {
                            warn!("signal '{}' is driven by more than one gate", gate.output);
                        }
                        netlist.gates.push(gate);
                    }
                    None => warn!("skipping malformed gate statement: {}", line),
                },
                _ => warn!("skipping unrecognized statement: {}", line),
            }
        }

        netlist
    }
}

/// Splits a `, `-separated identifier list, dropping `;` and blanks.
fn append_idents(s: &str, out: &mut Vec<String>) {
    for part in s.split(',') {
        let name = part.trim().trim_end_matches(';').trim();
        if !name.is_empty() {
            out.push(name.to_string());
        }
    }
}

fn parse_gate(line: &str) -> Option<Gate> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    if close < open {
        return None;
    }

    // Head is "TYPE" or "TYPE instance"; the instance name is irrelevant.
    let ty = line[..open].split_whitespace().next()?.to_string();

    let mut signals = Vec::new();
    append_idents(&line[open + 1..close], &mut signals);
    if signals.is_empty() {
        return None;
    }
    let output = signals.remove(0);

    Some(Gate {
        ty,
        output,
        inputs: signals,
    })
}
