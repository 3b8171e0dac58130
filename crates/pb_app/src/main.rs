mod cli;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use pb_core::config::ExportConfig;
use pb_core::logging;
use pb_core::persistence::Database;
use pb_core::ExportError;
use pb_docs::ExportFormat;

use crate::cli::{Cli, Command};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            match e.chain().find_map(|cause| cause.downcast_ref::<ExportError>()) {
                Some(export_error) => {
                    eprintln!("publicbodies: {}", export_error.user_message());
                    ExitCode::from(export_error.exit_code() as u8)
                }
                None => {
                    eprintln!("publicbodies: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ExportConfig::load_from_path(path)?,
        None => ExportConfig::load()?,
    };
    let _log_guard = logging::init_logging(&ExportConfig::logs_dir()?, &config.log_level)?;
    info!("Starting publicbodies v{VERSION}");

    let db = Database::open(&config)?;

    match &cli.command {
        Command::Alaveteli => export(ExportFormat::Alaveteli, &db, &config),
        Command::Nomenklatura => export(ExportFormat::Nomenklatura, &db, &config),
        Command::PublicBodies => export(ExportFormat::PublicBodies, &db, &config),
        Command::Import { file } => import(&db, &config, file),
    }
}

fn export(format: ExportFormat, db: &Database, config: &ExportConfig) -> Result<()> {
    info!("{} ({format}) for {}", format.description(), config.jurisdiction_code);
    // No transactional output: a failed write leaves stdout truncated.
    format.export(db, config, io::stdout().lock())?;
    Ok(())
}

fn import(db: &Database, config: &ExportConfig, file: &Path) -> Result<()> {
    let imported = if file.as_os_str() == "-" {
        db.import_documents(io::stdin().lock())?
    } else {
        let reader =
            File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
        db.import_documents(BufReader::new(reader))?
    };
    info!("Imported {imported} documents from {}", file.display());
    if !config.jurisdiction_code.trim().is_empty() {
        let stored = db.count_organizations(&config.jurisdiction_code)?;
        info!("{stored} organizations stored for {}", config.jurisdiction_code);
    }
    Ok(())
}
