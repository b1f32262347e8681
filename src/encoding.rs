//! Encoding and decoding definitions for Symbol implementations.

/// Alphabet table shared by every component, ordered by nucleotide code.
pub const ALPHABET: [(Nucleotide, u8); 4] = [
    (Nucleotide::A, b'A'),
    (Nucleotide::T, b'T'),
    (Nucleotide::C, b'C'),
    (Nucleotide::G, b'G'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    T,
    C,
    G,
}

pub trait Symbol:
    std::marker::Sized
    + Copy
    + Clone
    + Send
    + Sync
    + std::fmt::Debug
    + std::cmp::PartialEq
    + std::cmp::Eq
    + std::hash::Hash
    + std::fmt::Display
    + 'static
{
    const SIZE: usize;
    fn try_decode(s: &u8) -> Option<Self>;
    fn from_index(index: usize) -> Option<Self>;
    fn encode(&self) -> u8;
    fn index(&self) -> usize;
}

impl Symbol for Nucleotide {
    const SIZE: usize = 4;

    fn try_decode(s: &u8) -> Option<Self> {
        ALPHABET
            .iter()
            .find(|(_, character)| character == s)
            .map(|(nucleotide, _)| *nucleotide)
    }

    fn from_index(index: usize) -> Option<Self> {
        ALPHABET.get(index).map(|(nucleotide, _)| *nucleotide)
    }

    fn encode(&self) -> u8 {
        ALPHABET[self.index()].1
    }

    fn index(&self) -> usize {
        match self {
            Nucleotide::A => 0,
            Nucleotide::T => 1,
            Nucleotide::C => 2,
            Nucleotide::G => 3,
        }
    }
}

impl std::fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.encode() as char)
    }
}
