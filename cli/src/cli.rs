use std::path::PathBuf;

/// PlanScore command-line client (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "planscore", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Site configuration file (JSON); built-in defaults otherwise
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Override the geometry URL prefix
    #[arg(long, global = true)]
    pub geometry_prefix: Option<String>,

    /// Override the maximum number of polling attempts
    #[arg(long, global = true)]
    pub max_attempts: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Wait for a plan's scores and render them
    Score(ScoreArgs),

    /// Wait for an uploaded plan to be read and describe it
    Preread(PrereadArgs),

    /// Upload a plan file for scoring
    Upload(UploadArgs),

    /// Show historical partisan bias by state
    History(HistoryArgs),

    /// Describe a single bias score
    Bias(BiasArgs),
}

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// Plan id, plan page URL (`?id=...`), or a local plan JSON file
    pub plan: String,

    /// Write table, metrics, map and cards into this directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Local district GeoJSON instead of fetching it
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geometry: Option<PathBuf>,

    /// Skip the map
    #[arg(long)]
    pub no_map: bool,

    /// Show seat metrics even when the statewide vote is lopsided
    #[arg(long)]
    pub show_all: bool,

    /// Map width in pixels
    #[arg(long, default_value_t = 960)]
    pub width: u32,
}

#[derive(clap::Args, Debug)]
pub struct PrereadArgs {
    /// Plan id or annotate page URL (`?id=...`)
    pub plan: String,
}

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
    /// Plan file (GeoJSON, shapefile zip or block assignment)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Wait for the uploaded plan to be read
    #[arg(long)]
    pub wait: bool,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// View hash such as `#2016-ushouse`; overrides --year and --boundary
    #[arg(long)]
    pub hash: Option<String>,

    /// Election year
    #[arg(long)]
    pub year: Option<i64>,

    /// Chamber code: ushouse, statesenate or statehouse
    #[arg(long)]
    pub boundary: Option<String>,

    /// Only show this state (postal code)
    #[arg(long)]
    pub state: Option<String>,

    /// Local bias CSV instead of fetching it
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Write the legend HTML into this directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct BiasArgs {
    /// Score, e.g. -0.07
    #[arg(allow_hyphen_values = true)]
    pub score: f64,

    /// Metric: eg, pb, mm, d2 or overall
    #[arg(long, default_value = "eg")]
    pub metric: String,

    /// Chamber code used to scale the color
    #[arg(long, default_value = "ushouse")]
    pub chamber: String,
}
