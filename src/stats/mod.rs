//! Statistics and metric trait implementations

pub mod tree;

pub use tree::TreeSummary;
