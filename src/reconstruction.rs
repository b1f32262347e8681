//! Reconstruction of a lineage tree from serialized leaf paths.
//!
//! Leaf paths only record sequences, and sequences repeat across a tree: an
//! unchanged branch equals its parent and separate lineages may converge on
//! the same string. A path therefore cannot be attached by string alone.
//! Nodes are rebuilt level by level, and a path step attaches below the first
//! existing node (in id order) whose depth matches and whose whole ancestor
//! path agrees with the record.
//!
//! The matching is greedy. A step that finds no validated ancestor, or finds
//! the required child slot occupied by a different sequence, abandons the rest
//! of that record. Nothing is ever linked below an ancestor whose path
//! disagrees with the record, but records may be left partially attached.

use std::path::Path;

use crate::core::{Branch, NodeId, Sequence, Tree};
use crate::errors::{PhylogenyError, Result};
use crate::readwrite::{PathRecord, TreeSerializer};

#[derive(Debug)]
pub struct Reconstruction {
    pub tree: Tree,
    /// Records that could not be parsed.
    pub skipped: Vec<PhylogenyError>,
    /// Line numbers of records that were only partially attached.
    pub abandoned: Vec<usize>,
    /// Line numbers of fully attached records and their leaf node.
    pub attached: Vec<(usize, NodeId)>,
}

pub struct ReverseReconstructor;

impl ReverseReconstructor {
    /// Reconstruct from text lines. Blank lines are ignored.
    pub fn reconstruct<S: AsRef<str>>(lines: &[S]) -> Result<Reconstruction> {
        let records = lines
            .iter()
            .map(AsRef::<str>::as_ref)
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| PathRecord::parse(index + 1, line))
            .collect();
        Self::reconstruct_records(records)
    }

    pub fn read_from_file(path: &Path) -> Result<Reconstruction> {
        Self::reconstruct_records(TreeSerializer::read_from_file(path)?)
    }

    pub fn reconstruct_records(records: Vec<Result<PathRecord>>) -> Result<Reconstruction> {
        let mut skipped = Vec::new();
        let records: Vec<PathRecord> = records
            .into_iter()
            .filter_map(|record| match record {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("Skipping record: {err}");
                    skipped.push(err);
                    None
                }
            })
            .collect();

        let root = records
            .first()
            .ok_or(PhylogenyError::EmptyInput)?
            .sequences()[0]
            .clone();
        let mut tree = Tree::with_root(root);
        let max_depth = records.iter().map(PathRecord::depth).max().unwrap_or(0);

        // last node reached by each record, `None` once abandoned
        let mut reached: Vec<Option<NodeId>> = records
            .iter()
            .map(|record| (record.sequences()[0] == *tree[0].sequence()).then_some(0))
            .collect();

        for depth in 1..=max_depth {
            for (record, reached) in records.iter().zip(reached.iter_mut()) {
                if record.depth() < depth || reached.is_none() {
                    continue;
                }
                *reached = Self::attach(&mut tree, record.sequences(), depth);
                if reached.is_none() {
                    log::debug!(
                        "Abandoning record on line {} at depth {depth}.",
                        record.line()
                    );
                }
            }
        }

        let mut abandoned = Vec::new();
        let mut attached = Vec::new();
        for (record, reached) in records.iter().zip(reached) {
            match reached {
                Some(id) => attached.push((record.line(), id)),
                None => abandoned.push(record.line()),
            }
        }
        if !abandoned.is_empty() {
            log::warn!(
                "{} of {} records could not be fully attached.",
                abandoned.len(),
                records.len()
            );
        }

        Ok(Reconstruction {
            tree,
            skipped,
            abandoned,
            attached,
        })
    }

    /// Attach `sequences[depth]` below a validated ancestor and return the
    /// node now representing it.
    fn attach(tree: &mut Tree, sequences: &[Sequence], depth: usize) -> Option<NodeId> {
        let target = &sequences[depth];
        let prefix = &sequences[..depth];

        let view: &Tree = tree;
        let candidate = view
            .iter()
            .filter(|node| node.depth() == depth - 1 && node.sequence() == &prefix[depth - 1])
            .find(|node| Self::validate(view, node.id(), prefix))?
            .id();

        let branch = if tree[candidate].sequence() == target {
            Branch::Unchanged
        } else {
            Branch::Mutated
        };

        match tree[candidate].child(branch) {
            // elapsed times are not recorded, one time unit per generation
            None => tree.add_child(candidate, branch, target.clone(), depth as f64),
            // placed by an earlier record sharing this prefix
            Some(child) if tree[child].sequence() == target => Some(child),
            Some(_) => None,
        }
    }

    /// Check that the ancestors of `candidate` carry `prefix` in reverse.
    fn validate(tree: &Tree, candidate: NodeId, prefix: &[Sequence]) -> bool {
        tree.ancestors(candidate)
            .zip(prefix.iter().rev())
            .all(|(node, sequence)| node.sequence() == sequence)
    }
}
