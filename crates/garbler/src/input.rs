//! Private input providers.
//!
//! The garbler's input is either generated fresh, read from a file, or given
//! directly. Whatever the source, [`load_private_input`] checks the width
//! before the vector is used anywhere.

use std::convert::Infallible;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::debug;
use yao_types::traits::PrivateInputProvider;
use yao_types::{ParseBitsError, Party, PrivateInputVector};

use crate::GarblerError;

/// Fetches the garbler's input from `provider` and checks it has `bit_width` bits.
pub fn load_private_input<P: PrivateInputProvider>(
    provider: &mut P,
    bit_width: usize,
) -> Result<PrivateInputVector, GarblerError> {
    let input = provider
        .get_vector(Party::Alice, bit_width)
        .map_err(|e| GarblerError::Input(Box::new(e)))?;

    if input.len() != bit_width {
        return Err(GarblerError::PrivateInputSizeMismatch {
            expected: bit_width,
            actual: input.len(),
        });
    }

    debug!(bit_width, "loaded private input");
    Ok(input)
}

/// A fixed, caller-supplied input.
#[derive(Debug, Clone)]
pub struct FixedInput(pub PrivateInputVector);

impl PrivateInputProvider for FixedInput {
    type Error = Infallible;

    fn get_vector(
        &mut self,
        _party: Party,
        _bit_width: usize,
    ) -> Result<PrivateInputVector, Self::Error> {
        Ok(self.0.clone())
    }
}

/// Freshly generated random input bits.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: ChaCha20Rng,
}

impl RandomInput {
    /// Generates bits from `rng`.
    pub fn new(rng: ChaCha20Rng) -> Self {
        Self { rng }
    }

    /// Generates bits from a ChaCha20 stream seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl PrivateInputProvider for RandomInput {
    type Error = Infallible;

    fn get_vector(
        &mut self,
        _party: Party,
        bit_width: usize,
    ) -> Result<PrivateInputVector, Self::Error> {
        let bits = (0..bit_width).map(|_| self.rng.random::<bool>()).collect();
        Ok(PrivateInputVector::new(bits))
    }
}

/// Errors reading an input file.
#[derive(Debug, thiserror::Error)]
pub enum FileInputError {
    /// The file could not be read.
    #[error("failed to read input file {path}")]
    Io {
        /// File path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file holds something other than a bit string.
    #[error("invalid bit string in input file {path}")]
    Bits {
        /// File path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: ParseBitsError,
    },
    /// The file holds a `#` value that is not a decimal number.
    #[error("invalid number in input file {path}")]
    Number {
        /// File path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: ParseIntError,
    },
}

/// Input read from a text file.
///
/// The file holds either a string of `0` and `1` characters, bound in order to
/// the Alice wires, or `#` followed by a decimal value expanded to the
/// requested width, most significant bit first. Surrounding whitespace is
/// ignored. A bit string is returned as written, so a length that disagrees
/// with the requested width surfaces in [`load_private_input`].
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
}

impl FileInput {
    /// Reads from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PrivateInputProvider for FileInput {
    type Error = FileInputError;

    fn get_vector(
        &mut self,
        party: Party,
        bit_width: usize,
    ) -> Result<PrivateInputVector, Self::Error> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| FileInputError::Io {
            path: self.path.clone(),
            source,
        })?;
        let contents = contents.trim();
        debug!(%party, path = %self.path.display(), "reading private input");

        let bits_err = |source| FileInputError::Bits {
            path: self.path.clone(),
            source,
        };

        match contents.strip_prefix('#') {
            Some(number) => {
                let value = number
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| FileInputError::Number {
                        path: self.path.clone(),
                        source,
                    })?;
                PrivateInputVector::from_value(value, bit_width).map_err(bits_err)
            }
            None => contents.parse().map_err(bits_err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn input_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_file_bit_string() {
        let file = input_file("1011\n");
        let input = load_private_input(&mut FileInput::new(file.path()), 4).unwrap();
        assert_eq!(input.to_string(), "1011");
    }

    #[test]
    fn test_file_decimal_value() {
        let file = input_file("# 11");
        let input = load_private_input(&mut FileInput::new(file.path()), 6).unwrap();
        assert_eq!(input.to_string(), "001011");
    }

    #[test]
    fn test_file_width_mismatch() {
        let file = input_file("10110");
        let err = load_private_input(&mut FileInput::new(file.path()), 4).unwrap_err();
        assert!(matches!(
            err,
            GarblerError::PrivateInputSizeMismatch {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_file_invalid_character() {
        let file = input_file("10a1");
        let err = load_private_input(&mut FileInput::new(file.path()), 4).unwrap_err();
        assert!(matches!(err, GarblerError::Input(_)));
    }

    #[test]
    fn test_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = FileInput::new(dir.path().join("absent.txt"));
        assert!(matches!(
            load_private_input(&mut provider, 4),
            Err(GarblerError::Input(_))
        ));
    }

    #[test]
    fn test_random_input_is_seeded() {
        let a = load_private_input(&mut RandomInput::from_seed(7), 32).unwrap();
        let b = load_private_input(&mut RandomInput::from_seed(7), 32).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_fixed_input_width_checked() {
        let mut provider = FixedInput("101".parse().unwrap());
        assert!(load_private_input(&mut provider, 3).is_ok());
        assert!(matches!(
            load_private_input(&mut provider, 4),
            Err(GarblerError::PrivateInputSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }
}
