use clap::{ArgAction, ArgGroup, Parser};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = None,
    name = "phylogenesy",
    group(ArgGroup::new("seed_sequence").required(true).args(["sequence", "sequence_file"])),
)]
pub struct Args {
    /// Path to parameters (yaml file). Flags given on the command line take precedence.
    #[clap(long)]
    pub settings: Option<String>,

    /// Transition rate.
    #[clap(long)]
    pub alpha: Option<f64>,

    /// Transversion rate.
    #[clap(long)]
    pub beta: Option<f64>,

    /// Mean waiting time between a lineage and its split.
    #[clap(long)]
    pub wait_time_mean: Option<f64>,

    /// Number of mutation events to simulate.
    #[clap(short, long)]
    pub epochs: Option<usize>,

    /// Seed for the random source.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Initial sequence over ATCG.
    #[clap(long)]
    pub sequence: Option<String>,

    /// Path to initial sequence (fasta file).
    #[clap(long)]
    pub sequence_file: Option<String>,

    /// Path to output leaf paths (csv file).
    #[clap(long, short, default_value = "tree.csv")]
    pub output: String,

    /// Number of mutation events to grow the reconstructed tree by.
    #[clap(long, default_value_t = 1)]
    pub extend_epochs: usize,

    /// Do not print trees to the console.
    #[clap(long, default_value_t = false)]
    pub quiet: bool,

    /// Path to log file.
    #[clap(long, default_value = "phylogenesy.log")]
    pub log_file: String,

    /// Increase logging verbosity.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
