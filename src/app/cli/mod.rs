//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api;
use crate::app::config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, ServerOverrides};
use crate::app::logging;
use crate::domain::AppError;
use crate::ports::ArtifactKind;

#[derive(Parser)]
#[command(name = "woopy")]
#[command(version)]
#[command(
    about = "Generate docker-compose projects for self-hosted WooCommerce sites",
    long_about = None
)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP generator service
    #[clap(visible_alias = "s")]
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory that receives persisted projects
        #[arg(long)]
        home: Option<PathBuf>,
        /// Do not store generated bundles on disk
        #[arg(long)]
        no_persist: bool,
    },
    /// Fetch docker-compose.yml for <company>/.env from a running server
    #[clap(visible_alias = "g")]
    Gen {
        /// Company directory containing a .env file
        company: PathBuf,
        /// Base URL of the woopy server
        #[arg(long, env = "WOOPY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server: String,
        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
        /// Fetch the whole project as project.zip
        #[arg(short, long, conflicts_with = "report")]
        bundle: bool,
        /// Fetch the credentials report as credentials.txt
        #[arg(short, long, conflicts_with = "bundle")]
        report: bool,
        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Generate a complete project directory without a server
    #[clap(visible_alias = "r")]
    Render {
        /// Path to the .env file
        env_file: PathBuf,
        /// Parent directory for the project (defaults to ~/.woopy)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = logging::init(cli.log_level.as_deref()).and_then(|_| dispatch(cli.command));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Serve { host, port, config, home, no_persist } => {
            let overrides = ServerOverrides { host, port, home, no_persist };
            api::serve(config.as_deref(), overrides)
        }
        Commands::Gen { company, server, force, bundle, report, timeout } => {
            let kind = if bundle {
                ArtifactKind::Bundle
            } else if report {
                ArtifactKind::Report
            } else {
                ArtifactKind::Manifest
            };
            run_gen(company, &server, kind, force, timeout)
        }
        Commands::Render { env_file, out } => {
            let stored = api::render(&env_file, out)?;
            println!("✅ Generated project {} at {}/", stored.slug, stored.path.display());
            Ok(())
        }
    }
}

fn run_gen(
    company: PathBuf,
    server: &str,
    kind: ArtifactKind,
    force: bool,
    timeout: u64,
) -> Result<(), AppError> {
    let client_config = ClientConfig::new(server, timeout)?;
    let path = api::fetch(company, &client_config, kind, force)?;
    println!("✅ Wrote {}", path.display());
    Ok(())
}
