//! IO for seed sequences and serialized trees.

mod sequence;
mod tree;

pub use sequence::SequenceIO;
pub use tree::{PathRecord, TreeSerializer};
