use super::types::{LedgerState, LEDGER_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default ledger file path (~/.config/evalue/ledger.json)
pub fn get_ledger_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("ledger.json"))
}

/// Load the ledger from a JSON file
///
/// A missing file yields an empty ledger. An unsupported version is an error.
pub fn load_ledger(path: &Path) -> Result<LedgerState> {
    if !path.exists() {
        return Ok(LedgerState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open ledger at {}", path.display()))?;

    let state: LedgerState = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse ledger at {}", path.display()))?;

    if state.version != LEDGER_VERSION {
        anyhow::bail!("Unsupported ledger version: {}", state.version);
    }

    Ok(state)
}

/// Save the ledger to a JSON file atomically
///
/// The parent directory is created if needed.
pub fn save_ledger(path: &Path, state: &LedgerState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize ledger")?;

    file.commit().context("Failed to save ledger")?;

    Ok(())
}
