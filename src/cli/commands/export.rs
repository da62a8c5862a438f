//! Export command handler

use super::{load_ledger, CommandResult};
use gpa_tracker::config::Config;
use gpa_tracker::core::transcript::Transcript;
use gpa_tracker::info;
use std::path::{Path, PathBuf};

/// Write the active student's transcript as Markdown
pub fn run(config: &Config, output: Option<&Path>) -> CommandResult {
    let (_, ledger) = load_ledger(config)?;
    let transcript = Transcript::new(&ledger, config.total_semesters());

    let path = match output {
        Some(path) => {
            transcript.write_file(path).map_err(|e| e.to_string())?;
            path.to_path_buf()
        }
        None => transcript
            .write_to(&PathBuf::from(&config.paths.exports_dir))
            .map_err(|e| e.to_string())?,
    };

    info!("Transcript exported to: {}", path.display());
    println!("✓ Transcript written: {}", path.display());
    Ok(())
}
