//! Leaf path format of a lineage tree.
//!
//! Every leaf is written as one comma separated record listing the sequences
//! from the root down to the leaf, followed by the leaf depth:
//!
//! ```text
//! ATCG,ATCG,TTCG,2
//! ```
//!
//! The format only keeps sequences and depths. Node ids, times and branch
//! slots are lost.

use itertools::Itertools;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::core::{Sequence, Tree};
use crate::errors::{PhylogenyError, Result};

/// One parsed leaf path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathRecord {
    line: usize,
    sequences: Vec<Sequence>,
}

impl PathRecord {
    /// Parse a record from its fields, the last of which is the depth.
    pub fn from_fields<'a, I>(line: usize, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let malformed = |reason: String| PhylogenyError::MalformedRecord { line, reason };

        let mut fields: Vec<&str> = fields.into_iter().map(str::trim).collect();
        if fields.len() < 2 {
            return Err(malformed(format!(
                "expected at least two fields, found {}",
                fields.len()
            )));
        }

        let depth_field = fields.pop().unwrap_or_default();
        let depth: usize = depth_field
            .parse()
            .map_err(|_| malformed(format!("invalid depth '{depth_field}'")))?;
        if depth != fields.len() - 1 {
            return Err(malformed(format!(
                "depth {depth} does not match {} sequences",
                fields.len()
            )));
        }

        let sequences = fields
            .iter()
            .map(|field| Sequence::decode(field).map_err(|err| malformed(err.to_string())))
            .collect::<Result<Vec<Sequence>>>()?;

        let length = sequences[0].len();
        if length == 0 {
            return Err(malformed("empty sequence".to_string()));
        }
        if let Some(field) = fields.iter().find(|field| field.len() != length) {
            return Err(malformed(format!(
                "sequence '{field}' differs in length from the root sequence"
            )));
        }

        Ok(Self { line, sequences })
    }

    /// Parse a single line with the same field rules as [`TreeSerializer::read`].
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        match csv_reader(text.as_bytes()).records().next() {
            Some(Ok(record)) => Self::from_fields(line, record.iter()),
            Some(Err(err)) => Err(PhylogenyError::MalformedRecord {
                line,
                reason: err.to_string(),
            }),
            None => Self::from_fields(line, std::iter::empty()),
        }
    }

    /// Line number the record was read from, starting at one.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Sequences from the root down to the leaf.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn depth(&self) -> usize {
        self.sequences.len() - 1
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

pub struct TreeSerializer;

impl TreeSerializer {
    /// One line per leaf, in leaf id order.
    pub fn serialize(tree: &Tree) -> Vec<String> {
        tree.leaves()
            .map(|leaf| {
                let path = tree.path(leaf.id()).iter().join(",");
                format!("{path},{}", leaf.depth())
            })
            .collect()
    }

    pub fn write(tree: &Tree, writer: &mut impl Write) -> io::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        for leaf in tree.leaves() {
            let path = tree.path(leaf.id());
            let record = path
                .iter()
                .map(|sequence| sequence.encode())
                .chain(std::iter::once(leaf.depth().to_string()));
            csv_writer.write_record(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_file(tree: &Tree, path: &Path) -> io::Result<()> {
        let mut writer = io::BufWriter::new(fs::File::create(path)?);
        Self::write(tree, &mut writer)?;
        writer.flush()
    }

    /// Read every record, keeping parse failures per record. Blank lines are
    /// skipped.
    pub fn read(reader: impl Read) -> Vec<Result<PathRecord>> {
        csv_reader(reader)
            .records()
            .enumerate()
            .map(|(index, record)| match record {
                Ok(record) => {
                    let line = record
                        .position()
                        .map_or(index + 1, |position| position.line() as usize);
                    PathRecord::from_fields(line, record.iter())
                }
                Err(err) => Err(PhylogenyError::MalformedRecord {
                    line: err
                        .position()
                        .map_or(index + 1, |position| position.line() as usize),
                    reason: err.to_string(),
                }),
            })
            .collect()
    }

    pub fn read_from_file(path: &Path) -> Result<Vec<Result<PathRecord>>> {
        let file = fs::File::open(path).map_err(|err| {
            PhylogenyError::ReadError(format!("Failed to read from {}: {err}", path.display()))
        })?;
        Ok(Self::read(io::BufReader::new(file)))
    }
}
