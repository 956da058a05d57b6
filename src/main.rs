use clap::{Parser, Subcommand, ValueEnum};
use dashfeed::config::Config;
use dashfeed::report::{error_banner, Summary};
use dashfeed::{Dashboard, DashboardError, LoadError, Loader, SourceKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dashfeed", about = "Load and normalise the sales dashboard CSV sources")]
struct Cli {
    /// Config file. Defaults to ~/.config/dashfeed/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory or http:// base URL holding the CSV files.
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Log at debug level to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load every source and print the dashboard data (default).
    Load {
        #[arg(long, value_enum, default_value_t = Format::Summary)]
        format: Format,
    },
    /// Load a single source and report how many rows survived cleaning.
    Diagnose {
        /// One of: sales, tracks, customers, genres, inventory.
        source: SourceKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Summary,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is::<LoadError>() || err.is::<DashboardError>() {
                eprintln!("{}", error_banner(&err));
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.sources.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.sources.data_dir, "configuration loaded");

    let loader: Loader = Loader::default();
    let command = cli.command.unwrap_or(Command::Load {
        format: Format::Summary,
    });

    match command {
        Command::Load { format } => {
            let dashboard = Dashboard::load(&loader, &config.sources.descriptors()).await?;
            match format {
                Format::Summary => print!("{}", Summary::new(&dashboard, &config.report)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
            }
        }
        Command::Diagnose { source } => {
            let diagnosis = loader.diagnose(&config.sources.descriptor(source)).await?;
            println!(
                "{}: {} rows ready for charting ({} parsed, {} empty dropped) from {}",
                diagnosis.source.name(),
                diagnosis.cleaned_rows,
                diagnosis.raw_rows,
                diagnosis.dropped_rows(),
                diagnosis.source.reference,
            );
        }
    }
    Ok(())
}
