use log::debug;
use serde::{Serialize, Deserialize};

use crate::{bitstreams::{BinaryWriter, BinaryWriterBuilder}, error::HuffmanError};

use super::{CodeTable, Symbol};

/// A packed bit-stream: the codes of the input bytes followed by the
/// end-of-stream code, zero-padded to a whole byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compressed {
    bytes: Box<[u8]>,
    bit_len: usize,
}

impl Compressed {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }

    /// Length in bytes, `ceil(bit_len / 8)`.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of meaningful bits, padding excluded.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }
}

impl From<BinaryWriter> for Compressed {
    fn from(writer: BinaryWriter) -> Self {
        Self { bytes: writer.os, bit_len: writer.written_bits }
    }
}

/// Packs bytes one at a time with a fixed code table.
pub struct HuffmanEncoder<'a> {
    codes: &'a CodeTable,
    writer: BinaryWriterBuilder,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(codes: &'a CodeTable) -> Self {
        Self { codes, writer: BinaryWriterBuilder::new() }
    }

    /// Reserves room for about `bytes` output bytes.
    pub fn with_capacity(codes: &'a CodeTable, bytes: usize) -> Self {
        Self { codes, writer: BinaryWriterBuilder::with_capacity(bytes) }
    }

    /// Appends the code of `symbol` and returns its length in bits.
    #[inline(always)]
    pub fn write_next(&mut self, symbol: Symbol) -> Result<usize, HuffmanError> {
        let code = self.codes.get(symbol).ok_or(HuffmanError::MissingCode(symbol))?;
        self.writer.push_bits(code.bits() as u64, code.len() as u64);
        Ok(code.len() as usize)
    }

    pub fn written_bits(&self) -> usize {
        self.writer.written_bits
    }

    /// Terminates the stream with the end-of-stream code and flushes it.
    pub fn finish(mut self) -> Result<Compressed, HuffmanError> {
        self.write_next(Symbol::EndOfStream)?;
        Ok(self.writer.build().into())
    }
}

/// Encodes `buffer` followed by the end-of-stream code.
pub fn encode(buffer: &[u8], codes: &CodeTable) -> Result<Compressed, HuffmanError> {
    let mut encoder = HuffmanEncoder::with_capacity(codes, buffer.len() / 2 + 1);

    for &byte in buffer {
        encoder.write_next(Symbol::Byte(byte))?;
    }

    let compressed = encoder.finish()?;

    debug!("Packed {} bytes into {} bits ({} bytes)", buffer.len(), compressed.bit_len(), compressed.len());

    Ok(compressed)
}
