// Per-color bounded stroke history. Each color owns an ordered sequence
// of samples, newest first; a gap entry breaks line continuity.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::types::{Rgb, Sample};

pub struct StrokeStore {
    histories: HashMap<Rgb, VecDeque<Sample>>,
    capacity: usize,
}

impl StrokeStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            histories: HashMap::new(),
            capacity,
        }
    }

    /// Push a sample to the head of `color`'s history, evicting the
    /// oldest entry from the tail once the history is at capacity.
    pub fn append(&mut self, color: Rgb, sample: Sample) {
        let capacity = self.capacity;
        let history = self
            .histories
            .entry(color)
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        if history.len() == capacity {
            history.pop_back();
        }
        history.push_front(sample);
    }

    /// All `(color, history)` pairs. Iteration order across colors is
    /// unspecified; colors are independent.
    pub fn iter(&self) -> impl Iterator<Item = (&Rgb, &VecDeque<Sample>)> {
        self.histories.iter()
    }

    /// Drop every color's history.
    pub fn clear(&mut self) {
        self.histories.clear();
    }
}
