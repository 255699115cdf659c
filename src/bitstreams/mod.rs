use serde::{Serialize, Deserialize};

/// The packed output of a [`BinaryWriterBuilder`].
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct BinaryWriter {
    pub os: Box<[u8]>,
    /// Number of meaningful bits in `os`, the rest of the last byte is padding.
    pub written_bits: usize,
}

/// MSB-first bit writer: a growable byte sequence plus a partially filled
/// accumulator byte (`current`) with `free` low-order bits still unused.
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    pub current: u64,
    pub free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    /// Flushes the accumulator, zero-padding its unused bits. An accumulator
    /// with no bits in it is not emitted.
    pub fn build(mut self) -> BinaryWriter {
        if self.free < 8 {
            self.write(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
            written_bits: self.written_bits,
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self { os: Vec::with_capacity(bytes), ..Self::default() }
    }

    #[inline(always)]
    pub fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    /// Places the `len` low bits of `b` right after the filled part of the
    /// accumulator. `len` must not exceed `free`.
    #[inline(always)]
    pub fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        debug_assert!(len as usize <= self.free);

        self.free -= len as usize;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len as usize;
        len
    }

    /// Appends the `len` low-order bits of `x`, most significant first. The
    /// bits may span any number of output bytes.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut left = len;
        while left != 0 {
            let take = left.min(self.free as u64);
            left -= take;
            self.write_in_current(x >> left, take);
        }

        len
    }
}

/// MSB-first bit reader over a byte slice written by [`BinaryWriterBuilder`].
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct BinaryReader {
    is: Box<[u8]>,
    pub position: usize,
    pub read_bits: usize,
    pub current: u64,
    pub fill: usize,
}

impl BinaryReader {
    pub fn new(input_stream: Box<[u8]>) -> Self {
        BinaryReader { 
            is: input_stream, 
            position: 0, 
            read_bits: 0, 
            current: 0, 
            fill: 0 
        }
    }

    /// Moves the reader to the absolute bit offset `pos`, clamped to the end
    /// of the stream.
    pub fn position(&mut self, pos: u64) {
        let pos = pos.min(self.is.len() as u64 * 8);

        self.fill = 0;
        self.current = 0;
        self.position = pos as usize >> 3;
        self.read_bits = pos as usize;

        let residual = pos & 7;

        if residual != 0 {
            if let Some(b) = self.read() {
                self.current = b;
                self.fill = (8 - residual) as usize;
            }
        }
    }

    #[inline(always)]
    pub fn read(&mut self) -> Option<u64> {
        let b = *self.is.get(self.position)?;
        self.position += 1;
        Some(b as u64)
    }

    /// Tops `current` up with whole bytes while they fit.
    #[inline(always)]
    pub fn refill(&mut self) -> usize {
        while self.fill <= 56 {
            match self.read() {
                Some(b) => {
                    self.current = (self.current << 8) | b;
                    self.fill += 8;
                }
                None => break,
            }
        }

        self.fill
    }

    /// Reads `len` bits as an integer, `None` when the stream is exhausted.
    #[inline(always)]
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 56, "Cannot read {} bits at once", len);

        if len == 0 {
            return Some(0);
        }

        if (self.fill as u64) < len {
            self.refill();
        }

        if (self.fill as u64) < len {
            return None;
        }

        self.read_bits += len as usize;
        self.fill -= len as usize;
        Some(self.current >> self.fill & ((1 << len) - 1))
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        self.read_int(1).map(|b| b == 1)
    }

    /// Bits not consumed yet, padding included.
    pub fn remaining_bits(&self) -> usize {
        self.is.len().saturating_sub(self.position) * 8 + self.fill
    }
}
