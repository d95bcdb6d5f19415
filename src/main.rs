use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use seqforge::config::Config;
use seqforge::error::{SeqForgeError, SfResult};
use seqforge::loader;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scored sequence table (CSV with `sequence` and `score` columns)
    #[arg(global = true, short, long)]
    input: Option<String>,

    /// Dataset name, resolved as <data-dir>/<name>.csv
    #[arg(global = true, short, long)]
    dataset: Option<String>,

    #[arg(global = true, long, default_value = "data")]
    data_dir: String,

    /// JSON file with curation/design parameters
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a difficulty-filtered training subset
    Curate(cmd::curate::CurateArgs),
    /// Annotate every row with its mutational gap
    Gaps(cmd::gaps::GapsArgs),
    /// Curate, generate mutants and evaluate them
    Design(cmd::design::DesignArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &clap::ArgMatches) -> SfResult<()> {
    // 1. Resolve and load the source table
    let path = resolve_input(cli)?;
    let source = loader::load_table(&path)?;
    info!(
        "🚀 Loaded {} sequences of length {}",
        source.len(),
        source.sequence_len()
    );

    // 2. Layer configuration: defaults < --config file < explicit flags
    let mut config = match &cli.config_file {
        Some(p) => {
            info!("⚙️  Loading config from: {}", p);
            Config::load_from_file(p)?
        }
        None => Config::default(),
    };

    let cli_config = match &cli.command {
        Commands::Curate(args) => Some((&args.config, "curate")),
        Commands::Design(args) => Some((&args.config, "design")),
        Commands::Gaps(_) => None,
    };
    if let Some((cli_config, name)) = cli_config {
        if let Some(sub) = matches.subcommand_matches(name) {
            config.merge_from_cli(cli_config, sub);
        }
    }

    // 3. Execute
    match &cli.command {
        Commands::Curate(args) => cmd::curate::run(args, &config, &source),
        Commands::Design(args) => cmd::design::run(args, &config, &source),
        Commands::Gaps(args) => cmd::gaps::run(args, &source),
    }
}

fn resolve_input(cli: &Cli) -> SfResult<PathBuf> {
    match (&cli.input, &cli.dataset) {
        (Some(path), _) => Ok(PathBuf::from(path)),
        (None, Some(name)) => loader::resolve_dataset(&cli.data_dir, name),
        (None, None) => Err(SeqForgeError::Config(
            "either --input or --dataset is required".to_string(),
        )),
    }
}
