//! Wire identifiers, wire keys and the masked entries handed to OT.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Index of a wire in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WireId {
    fn from(id: u32) -> Self {
        WireId(id)
    }
}

/// A 128-bit wire key.
///
/// Each input wire has two keys, one per semantic value. The key itself says
/// nothing about which value it stands for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Label(pub [u8; 16]);

impl Label {
    /// Returns the raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<[u8; 16]> for Label {
    fn from(bytes: [u8; 16]) -> Self {
        Label(bytes)
    }
}

impl From<Label> for [u8; 16] {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

// Keys are secret material, keep them out of casual debug output.
impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// The two keys of a wire, indexed by the wire's true bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireKeyPair([Label; 2]);

impl WireKeyPair {
    /// Creates a key pair from the keys for value 0 and value 1.
    pub const fn new(key0: Label, key1: Label) -> Self {
        WireKeyPair([key0, key1])
    }

    /// Returns the key standing for `value`.
    pub const fn get(&self, value: bool) -> Label {
        if value { self.0[1] } else { self.0[0] }
    }

    /// Returns both keys as `(key0, key1)`.
    pub const fn keys(&self) -> (Label, Label) {
        (self.0[0], self.0[1])
    }
}

/// A wire key together with its masked bit (`true bit XOR permutation bit`).
///
/// This is the only form in which an input value leaves the garbler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedInput {
    /// The key selected for the wire's true value.
    pub key: Label,
    /// The true value masked with the wire's permutation bit.
    pub masked_bit: bool,
}

/// Both OT options offered to the evaluator for one of its wires.
///
/// Option `i` is `(key_i, i XOR p)`, so the evaluator selects it with its own
/// true bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BobOptions(pub [MaskedInput; 2]);

impl BobOptions {
    /// Returns the option the evaluator receives when its bit is `value`.
    pub const fn select(&self, value: bool) -> MaskedInput {
        if value { self.0[1] } else { self.0[0] }
    }
}

/// Masked entries for the garbler's own wires, in Alice-wire order.
pub type AliceEntries = IndexMap<WireId, MaskedInput>;

/// OT options for every evaluator wire, in Bob-wire order.
pub type BobOptionTable = IndexMap<WireId, BobOptions>;

/// Formats a wire list the way the reports show it, e.g. `[1, 2]`.
pub fn format_wires(wires: &[WireId]) -> String {
    let inner = wires
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_key_pair_indexed_by_value() {
        let k0 = Label(hex!("000102030405060708090a0b0c0d0e0f"));
        let k1 = Label(hex!("f0e0d0c0b0a090807060504030201000"));
        let pair = WireKeyPair::new(k0, k1);

        assert_eq!(pair.get(false), k0);
        assert_eq!(pair.get(true), k1);
        assert_eq!(pair.keys(), (k0, k1));
    }

    #[test]
    fn test_label_display_is_hex() {
        let label = Label(hex!("2b7e151628aed2a6abf7158809cf4f3c"));
        assert_eq!(label.to_string(), "2b7e151628aed2a6abf7158809cf4f3c");
        assert_eq!(format!("{label:?}"), "Label(2b7e..)");
    }

    #[test]
    fn test_format_wires() {
        assert_eq!(format_wires(&[]), "[]");
        assert_eq!(format_wires(&[WireId(1), WireId(2)]), "[1, 2]");
    }
}
