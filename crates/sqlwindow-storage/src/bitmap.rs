use serde::{Deserialize, Serialize};

/// Validity bitmap for a column. A set bit marks a NULL entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullBitmap {
    data: Vec<u64>,
    len: usize,
}

impl NullBitmap {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        if index >= self.len {
            return true;
        }
        let word = index / 64;
        let bit = index % 64;
        (self.data[word] >> bit) & 1 == 1
    }

    pub fn push(&mut self, is_null: bool) {
        let word = self.len / 64;
        let bit = self.len % 64;
        if word >= self.data.len() {
            self.data.push(0);
        }
        if is_null {
            self.data[word] |= 1 << bit;
        } else {
            self.data[word] &= !(1 << bit);
        }
        self.len += 1;
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.len = 0;
    }

    pub fn count_null(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        let full_words = self.len / 64;
        let remaining_bits = self.len % 64;
        let mut count: usize = self.data[..full_words]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        if remaining_bits > 0 && full_words < self.data.len() {
            let mask = (1u64 << remaining_bits) - 1;
            count += (self.data[full_words] & mask).count_ones() as usize;
        }
        count
    }

    pub fn count_valid(&self) -> usize {
        self.len - self.count_null()
    }

    pub fn is_all_null(&self) -> bool {
        self.len > 0 && self.count_null() == self.len
    }

    pub fn gather(&self, indices: &[usize]) -> NullBitmap {
        let len = indices.len();
        if len == 0 {
            return NullBitmap::new();
        }
        let num_words = len.div_ceil(64);
        let mut data = vec![0u64; num_words];
        for (out_idx, &src_idx) in indices.iter().enumerate() {
            if self.is_null(src_idx) {
                let word = out_idx / 64;
                let bit = out_idx % 64;
                data[word] |= 1 << bit;
            }
        }
        NullBitmap { data, len }
    }

    /// Appends the bits `start..end` of `other`.
    pub fn extend_range(&mut self, other: &NullBitmap, start: usize, end: usize) {
        let end = end.min(other.len);
        if start >= end {
            return;
        }
        if self.len % 64 == 0 && start % 64 == 0 && end == other.len {
            let first_word = start / 64;
            self.data.truncate(self.len / 64);
            self.data.extend_from_slice(&other.data[first_word..]);
            self.len += end - start;
            return;
        }
        for i in start..end {
            self.push(other.is_null(i));
        }
    }

    pub fn extend(&mut self, other: &NullBitmap) {
        self.extend_range(other, 0, other.len);
    }
}

impl PartialEq for NullBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.len).all(|i| self.is_null(i) == other.is_null(i))
    }
}

impl Default for NullBitmap {
    fn default() -> Self {
        Self::new()
    }
}
