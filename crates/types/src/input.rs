//! Private input vectors.

use std::fmt;
use std::str::FromStr;

use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

/// The two protocol parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    /// The garbler.
    Alice,
    /// The evaluator.
    Bob,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Alice => f.write_str("Alice"),
            Party::Bob => f.write_str("Bob"),
        }
    }
}

/// Error parsing a bit string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBitsError {
    /// A character other than `0` or `1`.
    #[error("invalid input character {found:?} at position {position}")]
    InvalidCharacter {
        /// The character found.
        found: char,
        /// Its position in the string.
        position: usize,
    },
    /// A value that needs more bits than requested.
    #[error("value {value} does not fit in {width} bits")]
    ValueTooWide {
        /// The value.
        value: u64,
        /// The requested width.
        width: usize,
    },
}

/// An ordered bit sequence bound position by position to a party's wires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PrivateInputVector(BitVec);

impl PrivateInputVector {
    /// Wraps an existing bit vector.
    pub fn new(bits: BitVec) -> Self {
        Self(bits)
    }

    /// Builds a vector from individual bits.
    pub fn from_bools(bits: &[bool]) -> Self {
        Self(bits.iter().copied().collect())
    }

    /// Encodes `value` as `width` bits, most significant first.
    pub fn from_value(value: u64, width: usize) -> Result<Self, ParseBitsError> {
        if width < 64 && value >> width != 0 {
            return Err(ParseBitsError::ValueTooWide { value, width });
        }

        let bits = (0..width)
            .rev()
            .map(|i| i < 64 && (value >> i) & 1 == 1)
            .collect();
        Ok(Self(bits))
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the bits.
    pub fn as_bitslice(&self) -> &BitSlice {
        self.0.as_bitslice()
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().by_vals()
    }
}

impl FromStr for PrivateInputVector {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitVec::with_capacity(s.len());
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(ParseBitsError::InvalidCharacter { found, position }),
            }
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for PrivateInputVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let v: PrivateInputVector = "1011".parse().expect("valid bits");
        assert_eq!(v.len(), 4);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![true, false, true, true]);
        assert_eq!(v.to_string(), "1011");
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let err = "10x1".parse::<PrivateInputVector>().unwrap_err();
        assert_eq!(
            err,
            ParseBitsError::InvalidCharacter {
                found: 'x',
                position: 2
            }
        );
    }

    #[test]
    fn test_from_value_msb_first() {
        let v = PrivateInputVector::from_value(11, 4).expect("fits");
        assert_eq!(v.to_string(), "1011");

        let v = PrivateInputVector::from_value(1, 6).expect("fits");
        assert_eq!(v.to_string(), "000001");
    }

    #[test]
    fn test_from_value_too_wide() {
        assert_eq!(
            PrivateInputVector::from_value(16, 4),
            Err(ParseBitsError::ValueTooWide {
                value: 16,
                width: 4
            })
        );
    }
}
