use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use heft::HeftConfig;
use heft::registry::Registry;
use heft::{interactive, runner};

#[derive(Parser, Debug)]
#[command(
    name = "heft",
    version,
    about = "Ranks local projects and their dependencies by how much they actually matter",
    long_about = None
)]
struct Cli {
    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print registered project directories
    List,
    /// Score registered directories and print a ranked report
    Analyze {
        /// Import extraction engine
        #[arg(long, value_parser = ["ast", "text"])]
        engine: Option<String>,

        /// Report format
        #[arg(short, long, value_parser = ["plain", "json", "md"])]
        format: Option<String>,

        /// Dependency leaderboard length
        #[arg(long)]
        top: Option<usize>,

        /// Analyze these directories instead of the registry (repeatable)
        #[arg(long = "path", value_name = "DIR")]
        paths: Vec<PathBuf>,
    },
    /// Register a project directory
    Add { path: PathBuf },
    /// Unregister a project directory
    Remove { path: PathBuf },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // 1. Load from file or default
    let mut config = HeftConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if cli.verbose {
        config.verbose = true;
    }

    match cli.command {
        Some(Commands::List) => {
            let registry = Registry::load_or_default(&Registry::location());
            runner::run_list(&registry)
        }
        Some(Commands::Analyze {
            engine,
            format,
            top,
            paths,
        }) => {
            if let Some(engine) = engine {
                config.engine = engine;
            }
            if let Some(format) = format {
                config.format = format;
            }
            if let Some(top) = top {
                config.top = top;
            }
            config.validate()?;

            let directories = if paths.is_empty() {
                Registry::load_or_default(&Registry::location()).directories
            } else {
                paths
            };
            runner::run_analyze(&directories, &config)
        }
        Some(Commands::Add { path }) => runner::run_add(&path),
        Some(Commands::Remove { path }) => runner::run_remove(&path),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => interactive::register_interactively(),
    }
}
