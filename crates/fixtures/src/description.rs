//! JSON circuit description files.
//!
//! ```json
//! {
//!   "name": "demo",
//!   "circuits": [
//!     {
//!       "id": "and",
//!       "alice": [0],
//!       "bob": [1],
//!       "out": [2],
//!       "gates": [{ "id": 2, "type": "AND", "in": [0, 1] }]
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use yao_types::{CircuitTopology, GarbledCircuit};

use crate::garble;

/// A named set of circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitFile {
    /// Name of the set.
    pub name: String,
    /// Circuits in session order.
    pub circuits: Vec<CircuitTopology>,
}

impl CircuitFile {
    /// Garbles every circuit, in order.
    pub fn garble_all<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<GarbledCircuit>> {
        self.circuits
            .iter()
            .map(|c| {
                garble(c.clone(), rng).with_context(|| format!("failed to garble circuit {}", c.id))
            })
            .collect()
    }
}

/// Reads a circuit description file.
pub fn load_circuit_file(path: impl AsRef<Path>) -> Result<CircuitFile> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open circuit file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse circuit file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rand_chacha::ChaCha20Rng;
    use rand_chacha::rand_core::SeedableRng;
    use tempfile::NamedTempFile;
    use yao_types::{GateType, WireId};

    use super::*;
    use crate::{adder, and_gate};

    const DEMO: &str = r#"{
        "name": "demo",
        "circuits": [
            {
                "id": "and",
                "alice": [0],
                "bob": [1],
                "out": [2],
                "gates": [{ "id": 2, "type": "AND", "in": [0, 1] }]
            },
            {
                "id": "not",
                "alice": [0],
                "out": [1],
                "gates": [{ "id": 1, "type": "NOT", "in": [0] }]
            }
        ]
    }"#;

    #[test]
    fn test_load_circuit_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DEMO.as_bytes()).unwrap();

        let loaded = load_circuit_file(file.path()).unwrap();
        assert_eq!(loaded.name, "demo");
        assert_eq!(loaded.circuits[0], and_gate());
        assert!(loaded.circuits[1].bob.is_empty());
        assert_eq!(loaded.circuits[1].gates[0].kind, GateType::NOT);
        assert_eq!(loaded.circuits[1].out, [WireId(1)]);
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_circuit_file(file.path()).unwrap_err();
        assert!(format!("{err}").contains("failed to parse circuit file"));
    }

    #[test]
    fn test_garble_all_names_bad_circuit() {
        let mut broken = and_gate();
        broken.id = "broken".into();
        broken.bob.clear();
        let set = CircuitFile {
            name: "set".into(),
            circuits: vec![adder(2), broken],
        };

        let err = set
            .garble_all(&mut ChaCha20Rng::seed_from_u64(0))
            .unwrap_err();
        assert!(format!("{err}").contains("broken"));
    }
}
