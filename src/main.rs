use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xlsx_roster::config::RosterConfig;
use xlsx_roster::{Result, RosterError, feed};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| RosterError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Accounts(args) => execute_accounts(args),
        Command::Groups(args) => execute_groups(args),
    }
}

fn execute_accounts(args: QueryArgs) -> Result<()> {
    let (config, input) = args.load()?;
    let accounts = feed::collect_accounts(&input, &config)?;

    for account in &accounts {
        println!("{}", serde_json::to_string(account)?);
    }
    Ok(())
}

fn execute_groups(args: QueryArgs) -> Result<()> {
    let (config, input) = args.load()?;
    let groups = feed::collect_groups(&input, &config)?;

    for group in &groups {
        println!("{group}");
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Extract account and group records from XLSX rosters."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List aggregated accounts as JSON lines.
    Accounts(QueryArgs),
    /// List distinct group names.
    Groups(QueryArgs),
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Extraction settings as a JSON file.
    #[arg(long)]
    config: PathBuf,

    /// Workbook path, overriding discovery via the configured directory and
    /// file-name prefix.
    #[arg(long)]
    input: Option<PathBuf>,
}

impl QueryArgs {
    fn load(&self) -> Result<(RosterConfig, PathBuf)> {
        let config = RosterConfig::from_file(&self.config)?;
        config.validate()?;

        let input = match &self.input {
            Some(path) if path.exists() => path.clone(),
            Some(path) => return Err(RosterError::MissingInput(path.clone())),
            None => config.source_path()?,
        };

        Ok((config, input))
    }
}
