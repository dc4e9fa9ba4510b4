use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::error::FormationError;
use crate::models::Candidate;

/// Heap entry: candidate plus its insertion sequence number for tie-breaks
#[derive(Debug)]
struct PoolEntry {
    sequence: u64,
    candidate: Candidate,
}

impl PoolEntry {
    /// Ordering key; a NaN score sorts behind every real score
    fn score(&self) -> f64 {
        let score = self.candidate.priority_score();
        if score.is_nan() {
            f64::INFINITY
        } else {
            score
        }
    }
}

impl Ord for PoolEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // The heap pops its maximum, so both keys are flipped: the lowest
        // score wins, and on equal scores the earliest insertion wins.
        other
            .score()
            .total_cmp(&self.score())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for PoolEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PoolEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PoolEntry {}

/// Priority-ordered collection of waiting players
///
/// Backed by a binary heap keyed on the candidate's priority score. The pool
/// has no notion of elapsed time: waiting ticks are whatever the caller
/// supplied at insertion.
#[derive(Debug, Default)]
pub struct CandidatePool {
    heap: BinaryHeap<PoolEntry>,
    next_sequence: u64,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Add a candidate to the pool in O(log n)
    pub fn insert(&mut self, candidate: Candidate) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(PoolEntry { sequence, candidate });
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Highest-priority candidate without removing it
    pub fn peek(&self) -> Option<&Candidate> {
        self.heap.peek().map(|entry| &entry.candidate)
    }

    /// Remove and return the `k` highest-priority candidates, best first
    ///
    /// Fails without touching the pool when fewer than `k` candidates wait.
    pub fn extract_top(&mut self, k: usize) -> Result<Vec<Candidate>, FormationError> {
        if self.heap.len() < k {
            return Err(FormationError::InsufficientCandidates {
                requested: k,
                available: self.heap.len(),
            });
        }

        let group: Vec<Candidate> = (0..k)
            .filter_map(|_| self.heap.pop())
            .map(|entry| entry.candidate)
            .collect();

        tracing::trace!("Extracted {} candidates, {} left in pool", group.len(), self.heap.len());

        Ok(group)
    }

    /// Consume the pool, returning the leftover candidates best first
    pub fn into_remaining(self) -> Vec<Candidate> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|entry| entry.candidate)
            .collect()
    }
}

impl Extend<Candidate> for CandidatePool {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut pool = CandidatePool::new();
        pool.extend(iter);
        pool
    }
}
