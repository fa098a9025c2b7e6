use std::collections::VecDeque;

/// A bucketed priority queue with FIFO order inside each priority.
///
/// Buckets grow on demand, so any `usize` priority is accepted. A bitmap of
/// non-empty buckets plus a cursor at the lowest possibly non-empty word keeps
/// pop-min cheap when priorities stay small, which is the case for grid
/// search scores.
pub struct PriorityQueue<T> {
    buckets: Vec<VecDeque<T>>,
    bitmap: Vec<u64>,
    cursor: usize,
    len: usize,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bitmap: Vec::new(),
            cursor: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, priority: usize, item: T) {
        if priority >= self.buckets.len() {
            self.buckets.resize_with(priority + 1, VecDeque::new);
            self.bitmap.resize(priority / 64 + 1, 0);
        }
        self.buckets[priority].push_back(item);

        // Update bitmap
        let word_idx = priority / 64;
        let bit_idx = priority % 64;
        self.bitmap[word_idx] |= 1u64 << bit_idx;
        self.cursor = self.cursor.min(word_idx);
        self.len += 1;
    }

    pub fn pop_min(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // Find first non-empty word at or after the cursor
        let word_idx = (self.cursor..self.bitmap.len()).find(|&i| self.bitmap[i] != 0)?;
        self.cursor = word_idx;

        // Find first non-empty bucket in that word
        let bit_idx = self.bitmap[word_idx].trailing_zeros() as usize;
        let priority = word_idx * 64 + bit_idx;

        let item = self.buckets[priority].pop_front()?;
        self.len -= 1;

        // Update bitmap if bucket is now empty
        if self.buckets[priority].is_empty() {
            self.bitmap[word_idx] &= !(1u64 << bit_idx);
        }

        Some(item)
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(VecDeque::clear);
        self.bitmap.iter_mut().for_each(|word| *word = 0);
        self.cursor = 0;
        self.len = 0;
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
