//! CLI entry point for taskpad.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use taskpad::controller::ViewController;
use taskpad::logging;
use taskpad::storage::Storage;
use taskpad::store::TaskStore;
use taskpad::tui;

/// Terminal todo list with filters and inline editing.
#[derive(Parser, Debug)]
#[command(
    name = "taskpad",
    version,
    about = "taskpad: a terminal todo list with filters and inline editing"
)]
struct Cli {
    /// Directory holding tasks.json and the logs/ subdirectory
    /// (defaults to the platform data directory).
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskpad: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(cli.data_dir)?;

    // Keep the handle alive for the whole run so buffered lines are
    // flushed on drop.
    let _logger = logging::init_logging(&data_dir)?;

    let storage = Storage::new(data_dir.clone());
    storage.ensure_dirs()?;

    let store = TaskStore::load(storage).map_err(|err| {
        log::error!("cannot load tasks: {err}");
        format!("cannot load tasks from {}: {err}", data_dir.display())
    })?;
    log::info!("loaded {} tasks from {}", store.len(), data_dir.display());

    if let Err(err) = tui::run(ViewController::new(store)) {
        log::error!("ui loop failed: {err}");
        return Err(err);
    }
    Ok(())
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match override_dir {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|base| base.join("taskpad"))
            .ok_or_else(|| "could not determine a data directory; pass --data-dir".into()),
    }
}
