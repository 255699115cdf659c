//! Static Huffman compression of in-memory byte buffers.
//!
//! [`compress`] counts byte frequencies, builds a Huffman tree with an extra
//! end-of-stream leaf, assigns each leaf its code and packs the buffer
//! MSB-first. The code table is not part of the output, callers that need
//! to decode keep it through [`compress_with_table`].

pub mod bit_path;
pub mod bitstreams;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod properties;

pub use bit_path::{BitPath, MAX_CODE_LEN};
pub use error::HuffmanError;
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, Compressed, HuffmanTree, HuffNode, Symbol};

/// Data value reserved for the end-of-stream symbol; never valid input.
pub const SENTINEL: u8 = 0xFF;

/// Compresses `buffer`, which must not contain [`SENTINEL`].
pub fn compress(buffer: &[u8]) -> Result<Compressed, HuffmanError> {
    compress_with_table(buffer).map(|(compressed, _)| compressed)
}

/// Like [`compress`], also returning the code table the output was packed with.
pub fn compress_with_table(buffer: &[u8]) -> Result<(Compressed, CodeTable), HuffmanError> {
    if let Some(offset) = buffer.iter().position(|&b| b == SENTINEL) {
        return Err(HuffmanError::SentinelCollision { offset });
    }

    let freq = FrequencyTable::from_bytes(buffer);
    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::from_tree(&tree)?;
    let compressed = huffman::encode(buffer, &codes)?;

    Ok((compressed, codes))
}
