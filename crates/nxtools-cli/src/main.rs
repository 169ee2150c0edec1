//! nxtools - Nexus & Xaven deployment tools
//!
//! Usage:
//!   nxtools install               # Rebuild everything and reinstall Xaven
//!   nxtools install events/api    # Rebuild and restage selected libraries
//!   nxtools deploy                # Redeploy Nexus plugins
//!   nxtools restart               # Restart Nexus
//!
//! Each failure site exits with its own code, see `FailureSite::exit_code`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nxtools_core::context::AppContext;
use nxtools_core::deploy::DeployReport;
use nxtools_core::error::NxError;
use nxtools_core::install::InstallReport;
use nxtools_core::process::SystemRunner;
use nxtools_core::service;

/// Exit code when the environment itself is unusable (no home directory, no cwd)
const ENVIRONMENT_FAILURE: u8 = 10;

#[derive(Parser)]
#[command(name = "nxtools", version)]
#[command(about = "Nexus & Xaven deployment tools", long_about = None)]
struct Cli {
    /// Configuration file [default: ~/.nxtools/config]
    #[arg(long, global = true, env = "NXTOOLS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Source tree root that module paths are relative to [default: current directory]
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Show commands as they run
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild and install the Xaven distribution
    ///
    /// With no modules: rebuild the whole tree, replace the unpacked
    /// distribution, stage the default libraries into its ext/ directory and
    /// rewrite stale version references.
    ///
    /// With modules: rebuild only those modules and copy their jars into ext/.
    Install {
        /// Module directories relative to the workspace
        modules: Vec<PathBuf>,
    },

    /// Build and redeploy plugin bundles into a local Nexus
    Deploy,

    /// Restart Nexus through its wrapper script
    Restart,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<NxError>()
                .map(NxError::exit_code)
                .unwrap_or(ENVIRONMENT_FAILURE);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "nxtools=debug,nxtools_core=debug,info"
    } else if quiet {
        "error"
    } else {
        "nxtools=info,nxtools_core=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_cli(cli: Cli) -> Result<()> {
    let ctx = build_context(cli.config, cli.workspace)?;
    let config = ctx.load_config()?;
    let runner = SystemRunner;

    match cli.command {
        Commands::Install { modules } => {
            let report = ctx.installer(&config, &runner).install(&modules)?;
            print_install(&report);
        }
        Commands::Deploy => {
            let report = ctx.deployer(&config, &runner).deploy()?;
            print_deploy(&report);
        }
        Commands::Restart => {
            service::restart(&config, &runner)?;
        }
    }
    Ok(())
}

fn build_context(config: Option<PathBuf>, workspace: Option<PathBuf>) -> Result<AppContext> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let workspace = match workspace {
        Some(dir) => dir,
        None => std::env::current_dir().context("Could not determine current directory")?,
    };

    Ok(match config {
        Some(path) => AppContext::with_config_path(home, workspace, path),
        None => AppContext::new(home, workspace),
    })
}

fn print_install(report: &InstallReport) {
    println!("Installed {} (version {})", report.distro_name, report.version);
    for dir in &report.built {
        println!("  rebuilt: {}", dir.display());
    }
    if report.distro_installed {
        println!("  distribution: unpacked");
    }
    for lib in &report.libraries {
        println!("  library: {}", lib.display());
    }
    for file in &report.adjusted {
        println!("  version adjusted: {}", file.display());
    }
}

fn print_deploy(report: &DeployReport) {
    for dir in &report.removed {
        println!("  removed: {}", dir.display());
    }
    for bundle in &report.bundles {
        println!("  deployed: {}", bundle.display());
    }
}
