//! Forward simulation of a lineage tree.
//!
//! Leaves are expanded breadth first. Each expansion draws an exponential
//! waiting time, mutates the leaf's sequence under the substitution model for
//! the accumulated time and, if the sequence visibly changed, appends an
//! unchanged and a mutated child.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Exp;
use std::collections::VecDeque;

use crate::core::{NodeId, Sequence, SubstitutionModel, Tree};
use crate::errors::{PhylogenyError, Result};

/// Source of the random draws consumed by the simulator.
pub trait Sampler {
    /// Uniform sample in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Exponential sample with the given mean.
    fn exponential(&mut self, mean: f64) -> f64;
}

pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Sampler for RandomSampler {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn exponential(&mut self, mean: f64) -> f64 {
        match Exp::new(mean.recip()) {
            Ok(distr) => distr.sample(&mut self.rng),
            Err(err) => {
                debug_assert!(false, "invalid exponential mean {mean}: {err}");
                log::error!("Invalid exponential mean {mean}: {err}");
                0.
            }
        }
    }
}

pub struct ForwardSimulator<S: Sampler> {
    model: SubstitutionModel,
    sampler: S,
}

impl<S: Sampler> ForwardSimulator<S> {
    pub fn new(model: SubstitutionModel, sampler: S) -> Self {
        Self { model, sampler }
    }

    pub fn get_model(&self) -> &SubstitutionModel {
        &self.model
    }

    /// Grow `tree` until `epoch_budget` mutation events happened or no leaf
    /// remains to expand. Returns the tree and the number of events.
    pub fn grow(
        &mut self,
        mut tree: Tree,
        epoch_budget: usize,
        wait_time_mean: f64,
    ) -> Result<(Tree, usize)> {
        if !wait_time_mean.is_finite() || wait_time_mean <= 0. {
            return Err(PhylogenyError::InvalidParameter(format!(
                "wait_time_mean must be positive, got {wait_time_mean}"
            )));
        }
        if epoch_budget == 0 {
            return Ok((tree, 0));
        }

        let mut queue: VecDeque<NodeId> = tree.leaves().map(|node| node.id()).collect();
        let mut events = 0;

        while events < epoch_budget {
            let Some(id) = queue.pop_front() else {
                log::debug!("No expandable leaves left after {events} events.");
                break;
            };

            let node = &tree[id];
            let time = node.time_depth() + self.sampler.exponential(wait_time_mean);
            let original = node.sequence().clone();
            let mutated = self.mutate(&original, time);

            let substitutions = mutated.hamming_distance(&original);
            if substitutions == 0 {
                log::trace!("Node {id} did not change at time {time:.4}, keeping it as leaf.");
                continue;
            }

            let (unchanged_id, mutated_id) = tree
                .add_children(id, original, mutated, time)
                .ok_or(PhylogenyError::NodeAlreadyExpanded(id))?;
            events += 1;
            log::debug!(
                "Event {events}: node {id} split into {unchanged_id} and {mutated_id} \
                at time {time:.4} with {substitutions} substitutions."
            );

            if events < epoch_budget {
                queue.push_back(unchanged_id);
                queue.push_back(mutated_id);
            }
        }

        Ok((tree, events))
    }

    /// Mutate every position independently under the matrix for `time`.
    fn mutate(&mut self, sequence: &Sequence, time: f64) -> Sequence {
        let matrix = self.model.matrix(time);
        sequence
            .iter()
            .map(|&symbol| {
                let sample = self.sampler.uniform();
                SubstitutionModel::substitute(&matrix, symbol, sample)
            })
            .collect()
    }
}
