use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "qra")]
#[command(about = "QRA CLI - quick reply aggregation and settings", long_about = None)]
struct Cli {
    /// Base directory for settings storage (defaults to the platform config dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged chat and global quick reply lists as JSON
    Fetch(commands::fetch::FetchArgs),
    /// Parse a catalog file and report admitted and skipped entries
    Catalog {
        /// Host catalog JSON file
        path: PathBuf,
    },
    /// Inspect or change the extension settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Change settings and save them to both backends
    Save(commands::settings::SaveArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args).await?,
        Commands::Catalog { path } => commands::fetch::catalog(path).await?,
        Commands::Settings { action } => {
            let base = commands::settings::base_dir(cli.data_dir)?;
            match action {
                SettingsAction::Show => commands::settings::show(&base).await?,
                SettingsAction::Save(args) => commands::settings::save(&base, args).await?,
            }
        }
    }

    Ok(())
}
