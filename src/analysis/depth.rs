//! Guesses-to-solve distribution of a game tree

use super::tree::{GameTree, NodeId};
use std::collections::BTreeMap;

/// How many answers a tree solves in each number of guesses
///
/// A leaf at depth `d` counts as solved in `d + 1` guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthDistribution {
    counts: BTreeMap<usize, usize>,
    total: usize,
}

impl DepthDistribution {
    /// Walk the tree and tally its leaves
    #[must_use]
    pub fn from_tree(tree: &GameTree) -> Self {
        let mut distribution = Self::default();
        if tree.is_empty() {
            return distribution;
        }

        let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = tree.node(id);
            if node.is_leaf() {
                distribution.record(depth + 1);
            } else {
                stack.extend(node.children().values().map(|&child| (child, depth + 1)));
            }
        }
        distribution
    }

    /// Count one answer solved in `guesses`
    pub fn record(&mut self, guesses: usize) {
        *self.counts.entry(guesses).or_insert(0) += 1;
        self.total += 1;
    }

    /// Answers per guess count, ascending
    #[must_use]
    pub const fn counts(&self) -> &BTreeMap<usize, usize> {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, guesses: usize) -> usize {
        self.counts.get(&guesses).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn max_guesses(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: usize = self.counts.iter().map(|(g, c)| g * c).sum();
        sum as f64 / self.total as f64
    }

    /// Answers solved within `limit` guesses
    #[must_use]
    pub fn solved_within(&self, limit: usize) -> usize {
        self.counts.range(..=limit).map(|(_, c)| c).sum()
    }
}
