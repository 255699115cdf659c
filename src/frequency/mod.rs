use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// Occurrence counts of the byte values present in a buffer.
///
/// Bytes that never occur have no entry, so `len()` is the number of
/// distinct values and every stored count is at least one.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut dense = [0u64; 256];
        for &b in bytes {
            dense[b as usize] += 1;
        }

        Self::from_counts(dense.iter().enumerate().map(|(b, &c)| (b as u8, c)))
    }

    /// Builds a table from explicit counts; zero counts are skipped and
    /// repeated bytes are summed.
    pub fn from_counts<I: IntoIterator<Item = (u8, u64)>>(counts: I) -> Self {
        let mut table = Self::new();
        for (byte, count) in counts {
            table.add(byte, count);
        }
        table
    }

    fn add(&mut self, byte: u8, count: u64) {
        if count == 0 {
            return;
        }
        self.counts.entry(byte).and_modify(|freq| *freq += count).or_insert(count);
    }

    /// Adds the counts of a table computed over another part of the input.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (&byte, &count) in other.counts.iter() {
            self.add(byte, count);
        }
    }

    #[inline(always)]
    pub fn get(&self, byte: u8) -> Option<u64> {
        self.counts.get(&byte).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted bytes.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(byte, count)` in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&b, &c)| (b, c))
    }
}

#[cfg(test)]
mod tests;
