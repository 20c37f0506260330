//! Small circuit generators.

use yao_types::{CircuitTopology, Gate, GateType, WireId};

/// Hands out wire ids and collects gates in evaluation order.
#[derive(Debug)]
struct Builder {
    next: u32,
    gates: Vec<Gate>,
}

impl Builder {
    fn new(first_free: u32) -> Self {
        Self {
            next: first_free,
            gates: Vec::new(),
        }
    }

    fn gate(&mut self, kind: GateType, inputs: &[WireId]) -> WireId {
        let id = WireId(self.next);
        self.next += 1;
        self.gates.push(Gate {
            id,
            kind,
            inputs: inputs.to_vec(),
        });
        id
    }

    fn finish(
        self,
        id: &str,
        alice: Vec<WireId>,
        bob: Vec<WireId>,
        out: Vec<WireId>,
    ) -> CircuitTopology {
        CircuitTopology {
            id: id.to_owned(),
            alice,
            bob,
            out,
            gates: self.gates,
        }
    }
}

/// Operand wires `start..start + n`, most significant first.
fn operand(start: u32, n: usize) -> Vec<WireId> {
    (start..start + n as u32).map(WireId).collect()
}

/// A single AND gate: Alice wire 0, Bob wire 1, output wire 2.
pub fn and_gate() -> CircuitTopology {
    let mut b = Builder::new(2);
    let out = b.gate(GateType::AND, &[WireId(0), WireId(1)]);
    b.finish("and", vec![WireId(0)], vec![WireId(1)], vec![out])
}

/// An n-bit ripple-carry adder.
///
/// Alice holds operand A on wires `0..n`, Bob holds B on wires `n..2n`, both
/// most significant bit first. The `n + 1` outputs are the carry followed by
/// the sum bits, so read most significant first they are `A + B`.
///
/// # Circuit Design
///
/// The least significant position is a half adder. Every other position is a
/// full adder:
/// ```text
/// half_sum   = a XOR b
/// sum        = half_sum XOR carry
/// half_carry = a AND b
/// carry_prop = half_sum AND carry
/// carry_out  = half_carry OR carry_prop
/// ```
///
/// # Panics
///
/// If `n` is zero.
pub fn adder(n: usize) -> CircuitTopology {
    assert!(n > 0, "adder needs at least one bit");

    let alice = operand(0, n);
    let bob = operand(n as u32, n);
    let mut b = Builder::new(2 * n as u32);

    let mut sums = Vec::with_capacity(n);
    let mut carry = None;
    for i in (0..n).rev() {
        let (x, y) = (alice[i], bob[i]);
        let half_sum = b.gate(GateType::XOR, &[x, y]);
        let half_carry = b.gate(GateType::AND, &[x, y]);

        match carry {
            None => {
                sums.push(half_sum);
                carry = Some(half_carry);
            }
            Some(c) => {
                sums.push(b.gate(GateType::XOR, &[half_sum, c]));
                let carry_prop = b.gate(GateType::AND, &[half_sum, c]);
                carry = Some(b.gate(GateType::OR, &[half_carry, carry_prop]));
            }
        }
    }

    let mut out = Vec::with_capacity(n + 1);
    out.extend(carry);
    out.extend(sums.into_iter().rev());
    b.finish(&format!("adder{n}"), alice, bob, out)
}

/// An n-bit unsigned comparator with a single output: Alice's operand is
/// greater than Bob's.
///
/// Operands are laid out as in [`adder`].
///
/// # Panics
///
/// If `n` is zero.
pub fn greater_than(n: usize) -> CircuitTopology {
    assert!(n > 0, "comparator needs at least one bit");

    let alice = operand(0, n);
    let bob = operand(n as u32, n);
    let mut b = Builder::new(2 * n as u32);

    // Scanning from the most significant bit, `eq` tracks whether every
    // higher bit matched.
    let mut gt: Option<WireId> = None;
    let mut eq: Option<WireId> = None;
    for i in 0..n {
        let (x, y) = (alice[i], bob[i]);
        let not_y = b.gate(GateType::NOT, &[y]);
        let mut wins = b.gate(GateType::AND, &[x, not_y]);
        if let Some(e) = eq {
            wins = b.gate(GateType::AND, &[wins, e]);
        }
        gt = Some(match gt {
            Some(g) => b.gate(GateType::OR, &[g, wins]),
            None => wins,
        });

        if i + 1 < n {
            let same = b.gate(GateType::XNOR, &[x, y]);
            eq = Some(match eq {
                Some(e) => b.gate(GateType::AND, &[e, same]),
                None => same,
            });
        }
    }

    let out = gt.into_iter().collect();
    b.finish(&format!("gt{n}"), alice, bob, out)
}
