mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gitvitae_core::store::Backend;

#[derive(Parser)]
#[command(
    name = "gitvitae",
    about = "Turn your git history into a living resume",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory (default: ~/.gitvitae)
    #[arg(long, global = true, env = "GITVITAE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage backend: sqlite or redb
    #[arg(long, global = true, default_value = "sqlite")]
    store: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the config file, storage, and default prompts
    Init,

    /// Sync the current repository's commit history into the store
    Seed,

    /// Start the dashboard server
    Serve {
        /// Port to listen on (default: first free port between 4000 and 4100)
        #[arg(long)]
        port: Option<u16>,
        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Smoke-test the configured AI provider with sample commits
    Ai,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => gitvitae_core::paths::default_data_dir()?,
    };
    let backend: Backend = cli.store.parse()?;

    match cli.command {
        Commands::Init => cmd::init::run(&data_dir, backend),
        Commands::Seed => cmd::seed::run(&data_dir, backend),
        Commands::Serve { port, no_open } => cmd::serve::run(&data_dir, backend, port, no_open),
        Commands::Ai => cmd::ai::run(&data_dir, backend),
    }
}
