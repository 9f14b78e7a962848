//! Depot CLI — local artifact registry and push/pull distribution.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use depot_registry::LocalRegistry;

use config::ClientConfig;

#[derive(Parser)]
#[command(name = "depot", version, about = "Local artifact registry and distribution tool")]
struct Cli {
    /// Registry root directory (default: $DEPOT_HOME or ~/.depot)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List artifacts in the local registry
    List {
        /// Print short ids only, one per artifact
        #[arg(long, short)]
        quiet: bool,
    },
    /// Add a packaged artifact (and its seal) to the registry
    Add {
        /// Packaged artifact file (.zip), with its seal (.json) beside it
        file: PathBuf,
        /// Target reference, e.g. acme/app:v1
        name: String,
    },
    /// Tag an artifact with a new reference
    Tag {
        /// Source reference
        source: String,
        /// Target reference
        target: String,
    },
    /// Remove artifacts by reference or id fragment
    Rm {
        /// References to remove
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove a single tag, leaving the artifact record
    Untag {
        /// Reference whose tag to remove
        name: String,
    },
    /// Clear every tag in a repository
    Purge {
        /// Repository reference
        name: String,
    },
    /// Upload an artifact to the remote registry
    Push {
        /// Reference to push
        name: String,
        /// Credentials as user:password
        #[arg(long, short)]
        user: Option<String>,
        /// Skip TLS certificate validation (self-signed remotes only)
        #[arg(long)]
        insecure: bool,
    },
    /// Download an artifact from the remote registry
    Pull {
        /// Reference to pull
        name: String,
        /// Credentials as user:password
        #[arg(long, short)]
        user: Option<String>,
        /// Skip TLS certificate validation (self-signed remotes only)
        #[arg(long)]
        insecure: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.registry {
        Some(root) => root,
        None => depot_core::registry_root()
            .ok_or_else(|| anyhow::anyhow!("cannot locate registry root (set DEPOT_HOME)"))?,
    };
    let mut registry = LocalRegistry::open(root)?;
    let config = ClientConfig::load(registry.root())?;

    match cli.command {
        Commands::List { quiet } => commands::list::run(&registry, quiet),
        Commands::Add { file, name } => commands::add::run(&mut registry, &file, &name),
        Commands::Tag { source, target } => commands::tag::run(&mut registry, &source, &target),
        Commands::Rm { names } => commands::rm::run(&mut registry, &names),
        Commands::Untag { name } => commands::untag::run(&mut registry, &name),
        Commands::Purge { name } => commands::purge::run(&mut registry, &name),
        Commands::Push {
            name,
            user,
            insecure,
        } => commands::push::run(&registry, &config, &name, user.as_deref(), insecure),
        Commands::Pull {
            name,
            user,
            insecure,
        } => commands::pull::run(&mut registry, &config, &name, user.as_deref(), insecure),
    }
}
