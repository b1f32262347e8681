//! This module contains the core datatypes of the library.

pub mod sequence;
pub mod substitution;
pub mod tree;

pub use sequence::Sequence;
pub use substitution::{SubstitutionMatrix, SubstitutionModel};
pub use tree::{Branch, Node, NodeId, Tree};
