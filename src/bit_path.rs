use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::HuffmanError;

/// The widest code a path can hold.
pub const MAX_CODE_LEN: u8 = 32;

/// A sequence of left (0) / right (1) turns from the root of a Huffman tree.
///
/// The first turn is the most significant of the `len` low-order bits of
/// `bits`, so the value can be pushed MSB-first into a bit writer as is.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitPath")]
pub struct BitPath {
    bits: u32,
    len: u8,
}

/// Unchecked wire form of a [`BitPath`].
#[derive(Deserialize)]
struct RawBitPath {
    bits: u32,
    len: u8,
}

impl TryFrom<RawBitPath> for BitPath {
    type Error = HuffmanError;

    fn try_from(raw: RawBitPath) -> Result<Self, Self::Error> {
        BitPath::from_raw(raw.bits, raw.len)
    }
}

impl BitPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a path from its raw pattern. Bits above `len` are cleared.
    pub fn from_raw(bits: u32, len: u8) -> Result<Self, HuffmanError> {
        if len > MAX_CODE_LEN {
            return Err(HuffmanError::code_too_long());
        }
        Ok(Self { bits: bits & mask(len), len })
    }

    #[inline(always)]
    pub fn extend_left(self) -> Result<Self, HuffmanError> {
        self.extend(0)
    }

    #[inline(always)]
    pub fn extend_right(self) -> Result<Self, HuffmanError> {
        self.extend(1)
    }

    fn extend(self, bit: u32) -> Result<Self, HuffmanError> {
        if self.len >= MAX_CODE_LEN {
            return Err(HuffmanError::code_too_long());
        }
        Ok(Self { bits: (self.bits << 1) | bit, len: self.len + 1 })
    }

    #[inline(always)]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the turn at `depth`, `false` for left and `true` for right.
    pub fn turn(&self, depth: u8) -> Option<bool> {
        if depth >= self.len {
            return None;
        }
        Some((self.bits >> (self.len - 1 - depth)) & 1 == 1)
    }

    /// True when `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitPath) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

#[inline(always)]
fn mask(len: u8) -> u32 {
    if len >= 32 { u32::MAX } else { (1 << len) - 1 }
}

impl fmt::Display for BitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for depth in 0..self.len {
            let c = if self.turn(depth) == Some(true) {'1'} else {'0'};
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_builds_msb_first() {
        let path = BitPath::new()
            .extend_right().unwrap()
            .extend_left().unwrap()
            .extend_right().unwrap();

        assert_eq!(path.bits(), 0b101);
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "101");
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let path = BitPath::new().extend_left().unwrap().extend_left().unwrap();

        assert_eq!(path.bits(), 0);
        assert_eq!(path.to_string(), "00");
    }

    #[test]
    fn test_extend_past_max_fails() {
        let mut path = BitPath::new();
        for _ in 0..MAX_CODE_LEN {
            path = path.extend_right().unwrap();
        }

        assert_eq!(path.bits(), u32::MAX);
        assert!(matches!(path.extend_left(), Err(HuffmanError::CodeTooLong { max: 32 })));
    }

    #[test]
    fn test_prefix() {
        let a = BitPath::from_raw(0b10, 2).unwrap();
        let b = BitPath::from_raw(0b101, 3).unwrap();
        let c = BitPath::from_raw(0b111, 3).unwrap();

        assert!(a.is_prefix_of(&b));
        assert!(!a.is_prefix_of(&c));
        assert!(!b.is_prefix_of(&a));
        assert!(BitPath::new().is_prefix_of(&c));
    }

    #[test]
    fn test_turns() {
        let path = BitPath::from_raw(0b011, 3).unwrap();

        assert_eq!(path.turn(0), Some(false));
        assert_eq!(path.turn(1), Some(true));
        assert_eq!(path.turn(2), Some(true));
        assert_eq!(path.turn(3), None);
    }

    #[test]
    fn test_deserialize_checks_length() {
        let path: BitPath = serde_json::from_str(r#"{"bits":5,"len":3}"#).unwrap();
        assert_eq!(path.to_string(), "101");

        assert!(serde_json::from_str::<BitPath>(r#"{"bits":5,"len":40}"#).is_err());
    }

    #[test]
    fn test_from_raw_rejects_long_codes() {
        assert!(BitPath::from_raw(0, 33).is_err());
        assert_eq!(BitPath::from_raw(0xFF, 4).unwrap().bits(), 0xF);
    }
}
