//! pipesync CLI tool.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pipesync")]
#[command(about = "Map build resources to pipeline jobs and back", long_about = None)]
struct Cli {
    /// Mapper configuration file (KDL)
    #[arg(long, global = true, env = "PIPESYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pipeline definition a build resource maps to
    Map {
        /// Resource file, or namespace/name with --cluster
        resource: String,
        /// Fetch the resource and its secrets from the cluster
        #[arg(long)]
        cluster: bool,
    },
    /// Fold a job's definition back into its build resource
    Reconcile {
        /// Job snapshot file (JSON or YAML)
        job: PathBuf,
        /// Resource file, or namespace/name with --cluster
        resource: String,
        /// Fetch the resource from the cluster
        #[arg(long)]
        cluster: bool,
    },
    /// Validate a mapper configuration file
    ValidateConfig {
        /// Path to the configuration file
        #[arg(default_value = "pipesync.kdl")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Map { resource, cluster } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::map::run(&config, &resource, cluster).await?;
        }
        Commands::Reconcile {
            job,
            resource,
            cluster,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::reconcile::run(&config, &job, &resource, cluster).await?;
        }
        Commands::ValidateConfig { path } => {
            commands::validate_config(&path)?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
