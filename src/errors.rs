//! All errors that can occur in the phylogenesy library.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum PhylogenyError {
    /// A rate or mean outside of its mathematically valid range.
    InvalidParameter(String),
    /// A serialized leaf path that cannot be parsed.
    MalformedRecord { line: usize, reason: String },
    /// Reconstruction input without a single valid leaf path.
    EmptyInput,
    InvalidSequence(String),
    ReadError(String),
    /// A node that already has children was selected for expansion.
    NodeAlreadyExpanded(usize),
}

pub type Result<T> = std::result::Result<T, PhylogenyError>;

impl fmt::Display for PhylogenyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhylogenyError::InvalidParameter(message) => {
                write!(f, "InvalidParameter: {}", message)
            }
            PhylogenyError::MalformedRecord { line, reason } => {
                write!(f, "MalformedRecord: line {}: {}", line, reason)
            }
            PhylogenyError::EmptyInput => write!(f, "EmptyInput: no valid leaf paths"),
            PhylogenyError::InvalidSequence(message) => {
                write!(f, "InvalidSequence: {}", message)
            }
            PhylogenyError::ReadError(message) => write!(f, "ReadError: {}", message),
            PhylogenyError::NodeAlreadyExpanded(id) => {
                write!(f, "NodeAlreadyExpanded: node {} already has children", id)
            }
        }
    }
}

impl std::error::Error for PhylogenyError {}
