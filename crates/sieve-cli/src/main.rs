use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sieve",
    about = "Sieve — node filtering for cluster placement",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to sieve.toml. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the filters active under the current configuration
    List,
    /// Print the nodes of a cluster snapshot that can host a workload
    Filter {
        /// Cluster snapshot (JSON)
        #[arg(long)]
        cluster: PathBuf,
        /// Workload descriptor (JSON)
        #[arg(long)]
        workload: PathBuf,
        /// Comma-separated filters to apply, in order (default: all active)
        #[arg(long, value_delimiter = ',')]
        filters: Vec<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show the rules each active filter reads from a workload
    Explain {
        /// Workload descriptor (JSON)
        #[arg(long)]
        workload: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sieve=debug,sieve_filter=debug")),
        )
        .init();

    let cli = Cli::parse();
    let registry = commands::load_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::List => commands::list::list(&registry),
        Commands::Filter {
            cluster,
            workload,
            filters,
            format,
        } => commands::filter::filter(&registry, &cluster, &workload, &filters, &format),
        Commands::Explain { workload } => commands::explain::explain(&registry, &workload),
    }
}
