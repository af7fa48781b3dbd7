use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "schemefinder",
    version,
    about = "Find the government schemes a farmer is eligible for"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the profile store directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive setup
    Init,
    /// Validate config and load the dataset
    Check {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Match answers given as flags or in a file
    Match {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// JSON or YAML file of answers
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// An answer as key=value (repeatable, overrides --input)
        #[arg(short = 'a', long = "answer")]
        answers: Vec<String>,

        #[command(flatten)]
        save: SaveArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Prompt for each rule column of the dataset, then match
    Ask {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        save: SaveArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List saved profiles
    Profiles {
        #[arg(long)]
        user: Option<String>,
    },
    /// Show past passes for a profile
    History {
        profile: String,

        #[arg(long)]
        user: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Match a saved profile's answers again
    Rerun {
        profile: String,

        #[arg(long)]
        user: Option<String>,

        #[command(flatten)]
        dataset: DatasetArgs,

        /// Answer overrides as key=value (repeatable)
        #[arg(short = 'a', long = "answer")]
        answers: Vec<String>,

        /// Do not record this pass in the profile's history
        #[arg(long)]
        no_save: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete a saved profile and its history
    Forget {
        profile: String,

        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Args, Default)]
pub struct DatasetArgs {
    /// Dataset file (JSON or YAML), overrides the config
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Dataset URL, overrides the config
    #[arg(long)]
    pub dataset_url: Option<String>,
}

#[derive(Args, Default)]
pub struct SaveArgs {
    /// Save answers and results under this profile name
    #[arg(short, long)]
    pub save: Option<String>,

    /// Profile owner (defaults to profiles.user_id from the config)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args, Default)]
pub struct OutputArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Show which rule decided each cell
    #[arg(long)]
    pub explain: bool,
}
