use yao_types::{EvaluationResult, GarbledCircuit};

use crate::GarblerError;

/// Reads the circuit's output bits from an evaluator result, in output order.
///
/// A wire missing from the result is an error, never a zero bit.
pub fn output_bits(
    circuit: &GarbledCircuit,
    result: &EvaluationResult,
) -> Result<Vec<bool>, GarblerError> {
    circuit
        .outputs()
        .iter()
        .map(|&wire| {
            result.bit(wire).ok_or_else(|| GarblerError::MissingOutput {
                circuit: circuit.id().to_owned(),
                wire,
            })
        })
        .collect()
}

/// Interprets bits as an unsigned integer, most significant first.
pub fn bits_to_u64(bits: &[bool]) -> u64 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Fails if the circuit has more output wires than a `u64` holds.
pub fn check_output_width(circuit: &GarbledCircuit) -> Result<(), GarblerError> {
    let outputs = circuit.outputs().len();
    if outputs > u64::BITS as usize {
        return Err(GarblerError::OutputTooWide {
            circuit: circuit.id().to_owned(),
            outputs,
        });
    }
    Ok(())
}

/// Decodes the evaluator result into the circuit's integer output.
pub fn decode_output(
    circuit: &GarbledCircuit,
    result: &EvaluationResult,
) -> Result<u64, GarblerError> {
    check_output_width(circuit)?;
    Ok(bits_to_u64(&output_bits(circuit, result)?))
}

#[cfg(test)]
mod tests {
    use yao_types::{
        CircuitTopology, GarbledTables, Gate, GateType, Label, WireId, WireKeyPair,
    };

    use super::*;

    // Alice 0, Bob 1, outputs [2, 3] = [0 AND 1, 0 XOR 1].
    fn circuit() -> GarbledCircuit {
        let topology = CircuitTopology {
            id: "two-out".into(),
            alice: vec![WireId(0)],
            bob: vec![WireId(1)],
            out: vec![WireId(2), WireId(3)],
            gates: vec![
                Gate {
                    id: WireId(2),
                    kind: GateType::AND,
                    inputs: vec![WireId(0), WireId(1)],
                },
                Gate {
                    id: WireId(3),
                    kind: GateType::XOR,
                    inputs: vec![WireId(0), WireId(1)],
                },
            ],
        };
        let pbits = (0..4).map(|w| (WireId(w), false)).collect();
        let keys = (0..2)
            .map(|w| (WireId(w), WireKeyPair::new(Label([0; 16]), Label([1; 16]))))
            .collect();
        GarbledCircuit::new(topology, GarbledTables::new(), pbits, keys).expect("valid circuit")
    }

    #[test]
    fn test_bits_to_u64() {
        assert_eq!(bits_to_u64(&[]), 0);
        assert_eq!(bits_to_u64(&[true, false, true, true]), 11);
        assert_eq!(bits_to_u64(&[false, false, true]), 1);
        assert_eq!(bits_to_u64(&[true; 64]), u64::MAX);
    }

    #[test]
    fn test_decode_reads_outputs_in_circuit_order() {
        let circuit = circuit();
        // Reported out of order on purpose.
        let result: EvaluationResult = [(WireId(3), false), (WireId(2), true)]
            .into_iter()
            .collect();

        assert_eq!(output_bits(&circuit, &result).expect("complete"), vec![true, false]);
        assert_eq!(decode_output(&circuit, &result).expect("complete"), 2);
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let circuit = circuit();
        let result: EvaluationResult = [(WireId(2), true)].into_iter().collect();

        let err = decode_output(&circuit, &result).unwrap_err();
        assert!(matches!(
            err,
            GarblerError::MissingOutput { wire: WireId(3), .. }
        ));
    }
}
