use anyhow::{Context, Result, anyhow};
use std::path::Path;

use crate::args::Args;
use crate::config::Parameters;
use crate::core::{Sequence, Tree};
use crate::readwrite::{SequenceIO, TreeSerializer};
use crate::reconstruction::ReverseReconstructor;
use crate::simulation::{ForwardSimulator, RandomSampler};
use crate::stats::TreeSummary;

pub struct Runner {
    args: Args,
    parameters: Parameters,
    seed_sequence: Sequence,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);

        let parameters = Self::load_parameters(&args)?;
        parameters.validate()?;
        log::info!("Loaded parameters\n{}", parameters);

        let seed_sequence = Self::load_sequence(&args)?;
        log::info!("Seed sequence {}", seed_sequence);

        Ok(Self {
            args,
            parameters,
            seed_sequence,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        let mut simulator = ForwardSimulator::new(
            self.parameters.substitution_model()?,
            match self.parameters.seed {
                Some(seed) => RandomSampler::seed_from_u64(seed),
                None => RandomSampler::from_os_rng(),
            },
        );

        // forward simulation
        log::info!("Growing tree for {} events...", self.parameters.epoch_budget);
        let (tree, events) = simulator.grow(
            Tree::with_root(self.seed_sequence.clone()),
            self.parameters.epoch_budget,
            self.parameters.wait_time_mean,
        )?;
        log::info!("Finished growing after {events} events.");
        self.report("Simulated tree", &tree);

        // serialize
        let output = Path::new(self.args.output.as_str());
        log::info!("Storing tree...");
        TreeSerializer::write_to_file(&tree, output)
            .with_context(|| format!("Unable to write tree file {}.", output.display()))?;
        log::info!("Finished storing tree.");

        // reconstruct
        log::info!("Reconstructing tree from {}...", output.display());
        let reconstruction = ReverseReconstructor::read_from_file(output)?;
        log::info!(
            "Reconstructed {} nodes, {} records attached, {} abandoned, {} skipped.",
            reconstruction.tree.len(),
            reconstruction.attached.len(),
            reconstruction.abandoned.len(),
            reconstruction.skipped.len()
        );
        self.report("Reconstructed tree", &reconstruction.tree);

        // continue growth on the reconstructed tree
        if self.args.extend_epochs > 0 {
            let (extended, events) = simulator.grow(
                reconstruction.tree,
                self.args.extend_epochs,
                self.parameters.wait_time_mean,
            )?;
            log::info!("Extended reconstructed tree by {events} events.");
            self.report("Extended tree", &extended);
        }

        log::info!("Finished simulation.");
        Ok(())
    }

    fn report(&self, title: &str, tree: &Tree) {
        log::info!(
            r###"
    {title}
    nodes={}
    leaves={}
    max_depth={}
    max_time_depth={:.4}
    level_sizes={:?}"###,
            tree.len(),
            tree.n_leaves(),
            tree.max_depth(),
            tree.max_time_depth(),
            tree.level_sizes()
        );
        if !self.args.quiet {
            println!("--- {title} ---");
            print!("{tree}");
        }
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Load parameters from file and apply command line overrides
    fn load_parameters(args: &Args) -> Result<Parameters> {
        let mut parameters = match &args.settings {
            Some(path) => Parameters::read_from_file(path)
                .with_context(|| format!("Unable to read parameters from {path}."))?,
            None => Parameters {
                alpha: args.alpha.ok_or_else(|| anyhow!("Missing --alpha."))?,
                beta: args.beta.ok_or_else(|| anyhow!("Missing --beta."))?,
                wait_time_mean: args
                    .wait_time_mean
                    .ok_or_else(|| anyhow!("Missing --wait-time-mean."))?,
                epoch_budget: args.epochs.ok_or_else(|| anyhow!("Missing --epochs."))?,
                seed: None,
            },
        };

        if let Some(alpha) = args.alpha {
            parameters.alpha = alpha;
        }
        if let Some(beta) = args.beta {
            parameters.beta = beta;
        }
        if let Some(wait_time_mean) = args.wait_time_mean {
            parameters.wait_time_mean = wait_time_mean;
        }
        if let Some(epochs) = args.epochs {
            parameters.epoch_budget = epochs;
        }
        if args.seed.is_some() {
            parameters.seed = args.seed;
        }
        Ok(parameters)
    }

    fn load_sequence(args: &Args) -> Result<Sequence> {
        let sequence = match (&args.sequence, &args.sequence_file) {
            (Some(sequence), _) => Sequence::decode(sequence)?,
            (None, Some(path)) => Sequence::load_fasta(Path::new(path))?,
            (None, None) => return Err(anyhow!("Missing initial sequence.")),
        };
        if sequence.is_empty() {
            return Err(anyhow!("Initial sequence is empty."));
        }
        Ok(sequence)
    }
}
