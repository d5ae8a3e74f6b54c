//! Resolves the per-user directory holding the database and settings file.
//!
//! | OS      | Directory                                              |
//! |---------|--------------------------------------------------------|
//! | Windows | `%LOCALAPPDATA%\<owner>\workpulse`                     |
//! | macOS   | `~/Library/Application Support/<owner>/workpulse`      |
//! | other   | `~/.local/share/<owner>/workpulse`                     |

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const VENDOR_NAME: &str = APP_METADATA_OWNER;
pub const APP_NAME: &str = APP_METADATA_NAME;

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        Self {
            base_path: platform_data_dir().join(VENDOR_NAME).join(APP_NAME),
        }
    }

    /// Full path of `file_name` inside the data directory. The directory is
    /// created on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn platform_data_dir() -> PathBuf {
    let env_dir = |name: &str| var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
    match OS {
        "windows" => env_dir("LOCALAPPDATA"),
        "macos" => env_dir("HOME").join("Library").join("Application Support"),
        _ => env_dir("HOME").join(".local").join("share"),
    }
}
