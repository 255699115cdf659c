use log::trace;
use serde::{Serialize, Deserialize};

use crate::{bit_path::BitPath, error::HuffmanError, frequency::FrequencyTable};

use super::{HuffmanTree, HuffNode, Symbol, K_NUM_SYMBOLS};

/// Maps every leaf symbol of a tree to the path that reaches it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Option<BitPath>>", try_from = "Vec<Option<BitPath>>")]
pub struct CodeTable {
    codes: Vec<Option<BitPath>>,
}

impl From<CodeTable> for Vec<Option<BitPath>> {
    fn from(table: CodeTable) -> Self {
        table.codes
    }
}

/// Accepts exactly one slot per symbol, as stored by a previous run.
impl TryFrom<Vec<Option<BitPath>>> for CodeTable {
    type Error = HuffmanError;

    fn try_from(codes: Vec<Option<BitPath>>) -> Result<Self, Self::Error> {
        if codes.len() != K_NUM_SYMBOLS {
            return Err(HuffmanError::Serialization(format!(
                "Code table has {} entries, expected {}", codes.len(), K_NUM_SYMBOLS)));
        }
        Ok(Self { codes })
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self { codes: vec![None; K_NUM_SYMBOLS] }
    }
}

impl CodeTable {
    /// Walks the tree depth-first, turning left for 0 and right for 1.
    ///
    /// A tree made of a single leaf gives that leaf the one-bit code `0`.
    /// Fails when a leaf lies deeper than [`crate::bit_path::MAX_CODE_LEN`].
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self, HuffmanError> {
        let mut table = CodeTable::default();

        if let HuffNode::Leaf { symbol, .. } = *tree.root_node() {
            table.codes[symbol.index()] = Some(BitPath::new().extend_left()?);
            return Ok(table);
        }

        let mut stack = vec![(tree.root(), BitPath::new())];

        while let Some((index, path)) = stack.pop() {
            match *tree.node(index) {
                HuffNode::Leaf { symbol, .. } => {
                    trace!("{} -> {} ({} bits)", symbol, path, path.len());
                    table.codes[symbol.index()] = Some(path);
                },
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right, path.extend_right()?));
                    stack.push((left, path.extend_left()?));
                }
            }
        }

        Ok(table)
    }

    #[inline(always)]
    pub fn get(&self, symbol: Symbol) -> Option<BitPath> {
        self.codes[symbol.index()]
    }

    #[inline(always)]
    pub fn get_byte(&self, byte: u8) -> Option<BitPath> {
        self.codes[byte as usize]
    }

    pub fn end_of_stream(&self) -> Option<BitPath> {
        self.get(Symbol::EndOfStream)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the coded symbols in index order, end-of-stream last.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, BitPath)> + '_ {
        self.codes.iter()
            .enumerate()
            .filter_map(|(i, code)| Some((Symbol::from_index(i)?, (*code)?)))
    }

    pub fn max_len(&self) -> u8 {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Bits needed to encode a buffer with these counts, end-of-stream included.
    pub fn total_bits(&self, freq: &FrequencyTable) -> Result<u64, HuffmanError> {
        let eos = self.end_of_stream().ok_or(HuffmanError::MissingCode(Symbol::EndOfStream))?;
        let mut total = eos.len() as u64;

        for (byte, count) in freq.iter() {
            let code = self.get_byte(byte).ok_or(HuffmanError::MissingCode(Symbol::Byte(byte)))?;
            total += count * code.len() as u64;
        }

        Ok(total)
    }

    /// Checks that no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                if a.is_prefix_of(b) || b.is_prefix_of(a) {
                    return false;
                }
            }
        }

        true
    }
}
