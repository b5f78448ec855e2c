use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sms_archive_core::importer::{AddressMode, ImportOptions};

const ARCHIVE_DIR: &str = "sms-archive";
const ARCHIVE_FILE: &str = "archive.sqlite";
const LOG_DIR: &str = "logs";

/// Resolved locations and pipeline settings for one invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub archive_path: PathBuf,
    pub log_dir: PathBuf,
    pub address_mode: AddressMode,
}

impl AppConfig {
    /// `archive` overrides the default `<data_dir>/sms-archive/archive.sqlite`.
    pub fn resolve(archive: Option<&Path>, raw_addresses: bool) -> Result<Self> {
        let archive_path = match archive {
            Some(path) => path.to_path_buf(),
            None => default_archive_dir()?.join(ARCHIVE_FILE),
        };
        let archive_dir = archive_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&archive_dir)
            .with_context(|| format!("creating archive directory {}", archive_dir.display()))?;
        let address_mode = if raw_addresses {
            AddressMode::Raw
        } else {
            AddressMode::Normalized
        };
        Ok(AppConfig {
            log_dir: archive_dir.join(LOG_DIR),
            archive_path,
            address_mode,
        })
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            address_mode: self.address_mode,
        }
    }
}

fn default_archive_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("no user data directory on this platform")?;
    Ok(base.join(ARCHIVE_DIR))
}
