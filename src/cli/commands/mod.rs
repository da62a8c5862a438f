//! CLI command handlers for `gpatracker`.
//!
//! Each command is implemented in its own submodule. Handlers return
//! `Err(message)` and leave printing the failure to `main`.

pub mod catalog;
pub mod config;
pub mod export;
pub mod grades;
pub mod predict;
pub mod student;
pub mod summary;

use gpa_tracker::config::Config;
use gpa_tracker::core::catalog::CreditCatalog;
use gpa_tracker::core::ledger::StudentLedger;
use gpa_tracker::core::store::{validate_student_id, LedgerStore};
use gpa_tracker::debug;

/// Result type shared by command handlers
pub type CommandResult = Result<(), String>;

/// Ledger store rooted at the configured records directory
pub fn store(config: &Config) -> LedgerStore {
    LedgerStore::new(&config.paths.records_dir)
}

/// Student id from `--student` or the config
pub fn active_student(config: &Config) -> Result<String, String> {
    let id = config.profile.student_id.trim();
    if id.is_empty() {
        return Err(
            "No student selected. Pass --student ID or run `gpatracker config set student_id ID`."
                .to_string(),
        );
    }
    validate_student_id(id).map_err(|e| e.to_string())?;
    Ok(id.to_string())
}

/// Load the active student's ledger
pub fn load_ledger(config: &Config) -> Result<(LedgerStore, StudentLedger), String> {
    let id = active_student(config)?;
    let store = store(config);
    if !store.exists(&id) {
        return Err(format!(
            "No ledger for '{id}' in {}. Run `gpatracker student init {id} --degree ...` first.",
            store.dir().display()
        ));
    }
    let ledger = store.load(&id).map_err(|e| e.to_string())?;
    Ok((store, ledger))
}

/// Persist `ledger`, reporting the path at debug level
pub fn save_ledger(store: &LedgerStore, ledger: &StudentLedger) -> CommandResult {
    let path = store.save(ledger).map_err(|e| e.to_string())?;
    debug!("Ledger written to {}", path.display());
    Ok(())
}

/// Configured catalog, or the bundled one
pub fn load_catalog(config: &Config) -> Result<CreditCatalog, String> {
    let path = config.catalog_path();
    if let Some(p) = &path {
        debug!("Loading credit catalog from {}", p.display());
    }
    CreditCatalog::load_or_builtin(path.as_deref()).map_err(|e| e.to_string())
}
