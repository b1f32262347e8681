use crate::core::Tree;

/// Trait extension to summarize the shape of a lineage tree
pub trait TreeSummary {
    fn n_leaves(&self) -> usize;
    fn max_depth(&self) -> usize;
    fn max_time_depth(&self) -> f64;
    fn level_sizes(&self) -> Vec<usize>;
}

impl TreeSummary for Tree {
    fn n_leaves(&self) -> usize {
        self.leaves().count()
    }

    fn max_depth(&self) -> usize {
        self.iter().map(|node| node.depth()).max().unwrap_or(0)
    }

    fn max_time_depth(&self) -> f64 {
        self.iter().map(|node| node.time_depth()).fold(0., f64::max)
    }

    /// Number of nodes at each depth, starting with the root.
    fn level_sizes(&self) -> Vec<usize> {
        self.levels().iter().map(|level| level.len()).collect()
    }
}
