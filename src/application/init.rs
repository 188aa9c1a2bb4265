//! Initialize journal use case

use crate::domain::WeekStart;
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;

/// Initialize a new journal at the specified path.
pub fn init(path: &Path, week_start: WeekStart) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new(week_start))?;

    tracing::info!(path = %path.display(), ?week_start, "journal initialized");
    Ok(repo)
}
