use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod config;
mod credentials;
mod dates;
mod editor;
mod error;
mod models;
mod options;
mod render;
mod viewer;

use api::TimeTrackClient;
use cli::Cli;
use commands::{Command, Context, TerminalOutput};
use credentials::TerminalPrompt;
use error::AppError;
use options::Options;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", cli::VERSION);
        return ExitCode::SUCCESS;
    }
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for message in err.messages() {
                eprintln!("{message}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TIMETRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let (editor, defaults) = match cli.config.clone().or_else(config::config_path) {
        Some(path) => match config::load_config(&path)? {
            Some(file) => {
                let defaults = file.defaults(&path)?;
                (file.editor, defaults)
            }
            None => (None, BTreeMap::new()),
        },
        None => {
            tracing::warn!("home directory not found, skipping config");
            (None, BTreeMap::new())
        }
    };

    let options = Options::resolve(editor, &defaults, cli)?;
    tracing::debug!(url = %options.url, date = %options.date, status = %options.status, "resolved options");

    let command = Command::parse(&cli.command)?;
    let client = TimeTrackClient::new(&options.url)?;
    let mut prompt = TerminalPrompt;
    let mut output = TerminalOutput;
    let mut ctx = Context {
        options: &options,
        api: &client,
        prompt: &mut prompt,
        output: &mut output,
    };
    commands::run(command, &mut ctx)
}
