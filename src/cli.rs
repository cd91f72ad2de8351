use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = "0.9";

const AFTER_HELP: &str = "\
subjects:
  time-entries, te    Time entries
  articles            Articles

actions:
  get                 Get subject (index action)
  create, c           Create subject (create action)

TimeTrack console client.";

/// Command-line flags. Each value set here wins over the config file.
#[derive(Debug, Default, Parser)]
#[command(
    name = "timetrack",
    version = VERSION,
    about = "TimeTrack console client",
    override_usage = "timetrack <SUBJECT> <ACTION> [OPTIONS]",
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct Cli {
    /// Subject and action, e.g. `te create`
    #[arg(value_name = "SUBJECT ACTION")]
    pub command: Vec<String>,

    /// Email
    #[arg(short, long, env = "TIMETRACK_EMAIL")]
    pub email: Option<String>,

    /// Password
    #[arg(short, long, env = "TIMETRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Url to TimeTrack api
    #[arg(short, long)]
    pub url: Option<String>,

    /// Time entry name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Real time for time entries
    #[arg(short = 't', long = "real-time", value_name = "TIME")]
    pub real_time: Option<String>,

    /// Project name for time entries
    #[arg(short = 'r', long)]
    pub project: Option<String>,

    /// Date for time entries (default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Status for time entries (default: finished)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Description (`--description=TEXT`); opens the editor when given without a value
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "")]
    pub description: Option<String>,

    /// Path to the config file (default: ~/.timetrack.yml)
    #[arg(long, env = "TIMETRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}
