use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "planit",
    version,
    about = "Transparent health, sustainability and price scoring for product catalogs"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every product and print them ranked
    Rank(RankCommand),
    /// Print the full score report of one product
    Score(ScoreCommand),
    /// Compute normalization bounds for a dataset
    Stats(StatsCommand),
    /// Check dataset headers and the product/attribute join
    Validate(ValidateCommand),
    /// Print the effective scoring configuration
    Config(ConfigCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BoundsMode {
    /// 5th..95th percentile of the dataset
    Dataset,
    /// Fixed fallback bounds
    Default,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortField {
    Planit,
    Health,
    Sustainability,
    Price,
    UnitPrice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoringArgs {
    /// Config file used instead of <DIR>/planit.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "dataset")]
    pub bounds: BoundsMode,

    /// Reuse bounds from a snapshot written by `planit stats --out`
    #[arg(long, conflicts_with = "bounds")]
    pub stats_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    #[arg(long, value_enum, default_value = "planit")]
    pub sort: SortField,
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,
    #[arg(long)]
    pub desc: bool,
    /// Keep products whose brand, name or retailer contains this text
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub id: String,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct StatsCommand {
    pub path: PathBuf,
    /// Write the snapshot to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ConfigCommand {
    /// Dataset directory whose config layers are merged
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
}
