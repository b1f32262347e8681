use seq_io::fasta;
use std::path::Path;

use crate::core::Sequence;
use crate::errors::{PhylogenyError, Result};

pub trait SequenceIO: Sized {
    fn load_fasta(path: &Path) -> Result<Self>;
}

impl SequenceIO for Sequence {
    /// Load the first record of a fasta file.
    fn load_fasta(path: &Path) -> Result<Sequence> {
        let mut reader = fasta::Reader::from_path(path).map_err(|err| {
            PhylogenyError::ReadError(format!("Failed to read from {}: {err}", path.display()))
        })?;
        let record = reader
            .next()
            .ok_or_else(|| {
                PhylogenyError::ReadError(format!("No sequence found in {}", path.display()))
            })?
            .map_err(|err| PhylogenyError::ReadError(format!("Unable to read sequence: {err}")))?;
        let sequence: Vec<u8> = record.full_seq().into_owned();
        let sequence = String::from_utf8(sequence)
            .map_err(|err| PhylogenyError::InvalidSequence(err.to_string()))?;
        Sequence::decode(sequence.to_ascii_uppercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_first_record() {
        let path = std::env::temp_dir().join("phylogenesy_test_seed.fasta");
        std::fs::write(&path, ">seed\nATCG\nggta\n>other\nAAAA\n").unwrap();
        let sequence = Sequence::load_fasta(&path).unwrap();
        assert_eq!(sequence.encode(), "ATCGGGTA");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn reject_invalid_symbols() {
        let path = std::env::temp_dir().join("phylogenesy_test_invalid_seed.fasta");
        std::fs::write(&path, ">seed\nATNG\n").unwrap();
        assert!(matches!(
            Sequence::load_fasta(&path),
            Err(PhylogenyError::InvalidSequence(_))
        ));
        std::fs::remove_file(path).unwrap();
    }
}
