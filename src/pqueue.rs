use std::collections::VecDeque;

/// A bucketed min-priority queue. Items of equal priority come out in
/// insertion order. Buckets grow on demand, so any `usize` priority is
/// accepted; memory is proportional to the largest priority seen.
pub struct PriorityQueue<T> {
    buckets: Vec<VecDeque<T>>,
    // One bit per bucket, set while the bucket is non-empty
    bitmap: Vec<u64>,
    len: usize,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bitmap: Vec::new(),
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
        self.bitmap[priority / 64] |= 1u64 << (priority % 64);
        self.len += 1;
    }

    pub fn pop_min(&mut self) -> Option<T> {
        let word_idx = self.bitmap.iter().position(|&word| word != 0)?;
        let bit_idx = self.bitmap[word_idx].trailing_zeros() as usize;
        let priority = word_idx * 64 + bit_idx;

        let item = self.buckets[priority].pop_front()?;
        if self.buckets[priority].is_empty() {
            self.bitmap[word_idx] &= !(1u64 << bit_idx);
        }
        self.len -= 1;

        Some(item)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_single() {
        let mut pq = PriorityQueue::new();
        pq.push(10, "hello");
        assert_eq!(pq.len(), 1);
        assert_eq!(pq.pop_min(), Some("hello"));
        assert_eq!(pq.pop_min(), None);
        assert!(pq.is_empty());
    }

    #[test]
    fn test_push_pop_ordered() {
        let mut pq = PriorityQueue::new();
        pq.push(10, "low");
        pq.push(5, "lower");
        pq.push(15, "high");

        assert_eq!(pq.pop_min(), Some("lower"));
        assert_eq!(pq.pop_min(), Some("low"));
        assert_eq!(pq.pop_min(), Some("high"));
        assert_eq!(pq.pop_min(), None);
    }

    #[test]
    fn test_same_priority_is_fifo() {
        let mut pq = PriorityQueue::new();
        pq.push(10, "first");
        pq.push(10, "second");
        pq.push(10, "third");

        assert_eq!(pq.pop_min(), Some("first"));
        assert_eq!(pq.pop_min(), Some("second"));
        assert_eq!(pq.pop_min(), Some("third"));
        assert_eq!(pq.pop_min(), None);
    }

    #[test]
    fn test_push_lower_after_pop() {
        let mut pq = PriorityQueue::new();
        pq.push(100, "a");
        pq.push(50, "b");
        assert_eq!(pq.pop_min(), Some("b"));
        pq.push(25, "c");
        pq.push(75, "d");
        assert_eq!(pq.pop_min(), Some("c"));
        assert_eq!(pq.pop_min(), Some("d"));
        assert_eq!(pq.pop_min(), Some("a"));
    }

    #[test]
    fn test_large_priorities_grow() {
        let mut pq = PriorityQueue::new();
        pq.push(10_000, "far");
        pq.push(0, "min");
        pq.push(4096, "mid");

        assert_eq!(pq.pop_min(), Some("min"));
        assert_eq!(pq.pop_min(), Some("mid"));
        assert_eq!(pq.pop_min(), Some("far"));
        assert_eq!(pq.len(), 0);
    }

    #[test]
    fn test_bitmap_word_boundaries() {
        let mut pq = PriorityQueue::new();
        pq.push(63, "word0_last");
        pq.push(64, "word1_first");
        pq.push(128, "word2_first");
        pq.push(0, "word0_first");

        assert_eq!(pq.pop_min(), Some("word0_first"));
        assert_eq!(pq.pop_min(), Some("word0_last"));
        assert_eq!(pq.pop_min(), Some("word1_first"));
        assert_eq!(pq.pop_min(), Some("word2_first"));
    }

    #[test]
    fn test_empty_queue() {
        let mut pq: PriorityQueue<i32> = PriorityQueue::new();
        assert_eq!(pq.pop_min(), None);
    }
}
