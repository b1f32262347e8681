//! Nucleotide sequences owned by tree nodes.
//!
//! A `Sequence` is a fixed-length run of `Nucleotide` symbols. Its length is
//! set at construction and only changes when the whole sequence is replaced.

use derive_more::Deref;
use std::fmt;
use std::str::FromStr;

use crate::encoding::{Nucleotide, Symbol};
use crate::errors::PhylogenyError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deref)]
pub struct Sequence(Vec<Nucleotide>);

impl Sequence {
    pub fn new(symbols: Vec<Nucleotide>) -> Self {
        Self(symbols)
    }

    /// Decode a sequence from its character representation.
    pub fn decode(string: &str) -> Result<Self, PhylogenyError> {
        string
            .as_bytes()
            .iter()
            .map(|character| {
                Nucleotide::try_decode(character).ok_or_else(|| {
                    PhylogenyError::InvalidSequence(format!(
                        "invalid nucleotide '{}' in {string}",
                        *character as char
                    ))
                })
            })
            .collect::<Result<Vec<Nucleotide>, PhylogenyError>>()
            .map(Self)
    }

    pub fn encode(&self) -> String {
        self.0.iter().map(|symbol| symbol.encode() as char).collect()
    }

    /// Replace the whole sequence with a copy of `other`.
    pub fn replace(&mut self, other: &Sequence) {
        self.0.clone_from(&other.0);
    }

    /// Number of positions at which two sequences carry different symbols.
    pub fn hamming_distance(&self, other: &Sequence) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl FromStr for Sequence {
    type Err = PhylogenyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl FromIterator<Nucleotide> for Sequence {
    fn from_iter<I: IntoIterator<Item = Nucleotide>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_encode() {
        for string in ["", "A", "ATCG", "GGGCCCTTTAAA", "TATATAGC"] {
            let sequence: Sequence = string.parse().unwrap();
            assert_eq!(sequence.len(), string.len());
            assert_eq!(sequence.encode(), string);
            assert_eq!(sequence.to_string(), string);
        }
    }

    #[test]
    fn decode_codes() {
        let sequence = Sequence::decode("ATCG").unwrap();
        let codes: Vec<usize> = sequence.iter().map(|symbol| symbol.index()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        assert!(matches!(
            Sequence::decode("ATXG"),
            Err(PhylogenyError::InvalidSequence(_))
        ));
        assert!(Sequence::decode("atcg").is_err());
    }

    #[test]
    fn replace_copies_without_aliasing() {
        let mut sequence = Sequence::decode("AAAA").unwrap();
        let other = Sequence::decode("TTTT").unwrap();
        sequence.replace(&other);
        assert_eq!(sequence, other);
        assert_eq!(sequence.hamming_distance(&other), 0);
        assert_eq!(
            sequence.hamming_distance(&Sequence::decode("TATA").unwrap()),
            2
        );
    }
}
