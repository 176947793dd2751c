mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use omniprof_core::config::OmniprofConfig;
use omniprof_core::event::OwnerId;
use omniprof_core::store::JsonStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omniprof")]
#[command(about = "Import and export OmniProf calendar events as .ics files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import events from an .ics file (e.g. a Pronote export)
    Import {
        file: PathBuf,

        /// Owner of the imported events (defaults to `default_owner` in config)
        #[arg(long)]
        owner: Option<String>,
    },
    /// Export events to an .ics file
    Export {
        #[arg(long)]
        owner: Option<String>,

        /// Only export events of this class (by id)
        #[arg(short, long)]
        class: Option<u64>,

        /// Export events from this date (YYYY-MM-DD, or "start" for everything)
        #[arg(long)]
        from: Option<String>,

        /// Export events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output file ("-" for stdout). Defaults to a name derived from the owner or class
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage the classes imported events get linked to
    Classes {
        #[command(subcommand)]
        command: ClassesCommand,
    },
}

#[derive(Subcommand)]
enum ClassesCommand {
    List {
        #[arg(long)]
        owner: Option<String>,
    },
    Add {
        /// Class name, e.g. "3A" or "4B - SVT"
        name: String,

        #[arg(long)]
        owner: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = OmniprofConfig::load()?;
    let mut store = JsonStore::open(&config.data_path())
        .with_context(|| format!("Could not open event store in {}", config.data_path().display()))?;
    debug!(path = %store.path().display(), "Opened event store");

    match cli.command {
        Commands::Import { file, owner } => {
            let owner = resolve_owner(owner, &config)?;
            commands::import::run(&mut store, &file, &owner)
        }
        Commands::Export {
            owner,
            class,
            from,
            to,
            output,
        } => {
            let owner = resolve_owner(owner, &config)?;
            let args = commands::export::ExportArgs {
                class_id: class,
                from,
                to,
                output,
            };
            commands::export::run(&store, &config, &owner, args)
        }
        Commands::Classes { command } => match command {
            ClassesCommand::List { owner } => {
                let owner = resolve_owner(owner, &config)?;
                commands::classes::list(&store, &owner)
            }
            ClassesCommand::Add { name, owner } => {
                let owner = resolve_owner(owner, &config)?;
                commands::classes::add(&mut store, &owner, &name)
            }
        },
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_owner(owner: Option<String>, config: &OmniprofConfig) -> Result<OwnerId> {
    match owner {
        Some(id) => Ok(OwnerId::from(id)),
        None => config.default_owner().ok_or_else(|| {
            anyhow::anyhow!(
                "No owner given.\n\n\
                Pass one with:\n  \
                omniprof <command> --owner <id>\n\n\
                or set a default in {}:\n  \
                default_owner = \"1\"",
                OmniprofConfig::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            )
        }),
    }
}
