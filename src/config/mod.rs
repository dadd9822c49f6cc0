use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder shipped in a fresh config file; treated as "not configured".
pub const DEFAULT_SERVER_URL: &str = "http://your-server.com/api/access-logs";
pub const DEFAULT_API_KEY: &str = "your-api-key-here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Remote archive settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default)]
    pub sync_enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_retention_days() -> i64 {
    crate::core::retention::DEFAULT_RETENTION_DAYS
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}
fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_key: default_api_key(),
            sync_enabled: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SyncConfig {
    /// An empty URL or the shipped placeholder means no server was set up.
    pub fn is_endpoint_configured(&self) -> bool {
        let url = self.server_url.trim();
        !url.is_empty() && url != DEFAULT_SERVER_URL
    }

    /// Refuse to talk to the server unless sync is enabled and pointed somewhere.
    pub fn check_ready(&self) -> AppResult<()> {
        if !self.sync_enabled {
            return Err(AppError::SyncDisabled);
        }
        if !self.is_endpoint_configured() {
            return Err(AppError::EndpointNotConfigured);
        }
        Ok(())
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let n = self.api_key.chars().count();
        if n <= 4 {
            return "*".repeat(n);
        }
        let tail: String = self.api_key.chars().skip(n - 4).collect();
        format!("{}{}", "*".repeat(n - 4), tail)
    }
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            retention_days: default_retention_days(),
            separator_char: default_separator_char(),
            sync: SyncConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("raccesslog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".raccesslog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("raccesslog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("raccesslog.sqlite")
    }

    /// Resolve the config path, honouring a `--config` override.
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom
            .map(crate::utils::path::expand_tilde)
            .unwrap_or_else(Self::config_file)
    }

    /// Defaults for a config stored at `path`: the database lives beside it.
    pub fn default_for(path: &Path) -> Self {
        let mut cfg = Config::default();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            cfg.database = dir.join("raccesslog.sqlite").to_string_lossy().to_string();
        }
        cfg
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; with `persist` the defaults are
    /// also written so the operator has something to edit.
    pub fn load_from(path: &Path, persist: bool) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            let cfg: Config = serde_yaml::from_str(&content)?;
            return Ok(cfg);
        }

        let cfg = Self::default_for(path);
        if persist {
            cfg.save_to(path)?;
            info(format!("Created default config file: {}", path.display()));
            info("Please update it with your server details.");
        }
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(path: &Path, custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);

        let mut config = Self::load_from(path, false)?;

        // DB name: user provided or default, relative names live next to the config
        if let Some(name) = custom_db {
            let p = crate::utils::path::expand_tilde(name);
            config.database = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            config.save_to(path)?;
            println!("✅ Config file: {:?}", path);
        }

        let db_path = Path::new(&config.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
