use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use repowatch::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repowatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Package repository update monitor", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single check cycle over all configured targets
    Check,

    /// Check repeatedly at a fixed interval
    Watch {
        /// Minutes between cycles (overrides the config file)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show the recorded timestamp for each target
    Status,

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check => repowatch::cli::check::run(cli.config.as_deref()).await,

        Commands::Watch { interval } => {
            repowatch::cli::watch::run(cli.config.as_deref(), interval).await
        }

        Commands::Status => repowatch::cli::status::run(cli.config.as_deref()),

        Commands::Init { force } => repowatch::cli::init::run(cli.config.as_deref(), force),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "repowatch", &mut io::stdout());
            Ok(())
        }
    }
}
