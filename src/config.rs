//! Store configuration.
//!
//! Fixed blob keys, rating and seeding constants, and the optional
//! `config.json` that tunes where and how the store persists its data.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChoresError, Result};

// =============================================================================
// Blob Keys
// =============================================================================

/// Key of the current-session blob.
pub const SESSION_KEY: &str = "hcm_current_user";

/// Key of the account collection blob (id -> {profile, password}).
pub const ACCOUNTS_KEY: &str = "hcm_users";

/// Key of the worker directory blob (ordered worker ids).
pub const DIRECTORY_KEY: &str = "hcm_workers";

// =============================================================================
// Ratings and Seeding
// =============================================================================

/// Rating bounds for newly registered workers, in tenths (3.0 - 5.0).
pub const REGISTRATION_RATING_TENTHS: (u32, u32) = (30, 50);

/// Rating bounds for synthetic directory entries, in tenths (2.5 - 5.0).
pub const SEED_RATING_TENTHS: (u32, u32) = (25, 50);

/// Number of synthetic workers written to an empty directory.
pub const SEED_WORKER_COUNT: usize = 16;

/// Years of experience range for synthetic workers.
pub const SEED_EXPERIENCE_YEARS: (u32, u32) = (1, 15);

/// Hourly price range for synthetic workers.
pub const SEED_PRICE: (u32, u32) = (15, 99);

// =============================================================================
// Paths
// =============================================================================

const APP_NAME: &str = "homechores";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOMECHORES_DATA_DIR";

/// Get the configuration directory path.
/// - Linux: ~/.config/homechores/
/// - Windows: %APPDATA%\homechores\
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ChoresError::Config("Could not find config directory".into()))
}

/// Get the full path to the config file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Default location of the persisted blobs.
/// - Linux: ~/.local/share/homechores/
/// - Windows: %APPDATA%\homechores\
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ChoresError::Config("Could not find data directory".into()))
}

// =============================================================================
// App Config
// =============================================================================

/// Contents of `config.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding the blobs. Falls back to [`default_data_dir`].
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Seed for ids, ratings and synthetic data. Random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Seed the worker directory on first listing.
    #[serde(default = "default_seed_directory")]
    pub seed_directory: bool,
}

fn default_seed_directory() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            rng_seed: None,
            seed_directory: default_seed_directory(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform config directory.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ChoresError::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ChoresError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve the data directory.
    ///
    /// Precedence: explicit override, then `HOMECHORES_DATA_DIR`, then the
    /// config file, then the platform data directory.
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        let from_env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        self.resolve_data_dir_with(cli_override, from_env)
    }

    fn resolve_data_dir_with(
        &self,
        cli_override: Option<&Path>,
        from_env: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = from_env.filter(|d| !d.as_os_str().is_empty()) {
            return Ok(dir);
        }
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}
