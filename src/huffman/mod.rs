use std::fmt;

use serde::{Serialize, Deserialize};

pub mod tree;
pub mod code_table;
pub mod encoder;

pub use tree::{HuffmanTree, HuffNode};
pub use code_table::CodeTable;
pub use encoder::{HuffmanEncoder, Compressed, encode};

/// Number of distinct symbols: every byte value plus the end-of-stream mark.
pub const K_NUM_SYMBOLS: usize = 257;

/// An entry of the coding alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Byte(u8),
    /// Marks the logical end of the packed payload.
    EndOfStream,
}

impl Symbol {
    /// Dense index in `0..K_NUM_SYMBOLS`, the end-of-stream mark last.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::EndOfStream => K_NUM_SYMBOLS - 1,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0..=255 => Some(Symbol::Byte(i as u8)),
            256 => Some(Symbol::EndOfStream),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) => write!(f, "{:#04x}", b),
            Symbol::EndOfStream => write!(f, "EOS"),
        }
    }
}
