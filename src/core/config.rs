use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

/// Requested changes to the sync settings; `None` leaves a field alone.
#[derive(Debug, Default, Clone)]
pub struct SyncUpdate {
    pub server_url: Option<String>,
    pub api_key: Option<String>,
    pub sync_enabled: Option<bool>,
}

impl SyncUpdate {
    pub fn is_empty(&self) -> bool {
        self.server_url.is_none() && self.api_key.is_none() && self.sync_enabled.is_none()
    }
}

pub struct ConfigLogic;

impl ConfigLogic {
    /// YAML rendering with the API key masked.
    pub fn render(cfg: &Config) -> AppResult<String> {
        let mut shown = cfg.clone();
        shown.sync.api_key = cfg.sync.masked_api_key();
        Ok(serde_yaml::to_string(&shown)?)
    }

    /// Apply `update` to `cfg`. Blank values are ignored, like an empty
    /// answer at a prompt. Returns the names of the fields that changed.
    pub fn apply(cfg: &mut Config, update: &SyncUpdate) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if let Some(url) = update.server_url.as_deref().map(str::trim)
            && !url.is_empty()
            && url != cfg.sync.server_url
        {
            cfg.sync.server_url = url.to_string();
            changed.push("server_url");
        }

        if let Some(key) = update.api_key.as_deref().map(str::trim)
            && !key.is_empty()
            && key != cfg.sync.api_key
        {
            cfg.sync.api_key = key.to_string();
            changed.push("api_key");
        }

        if let Some(enabled) = update.sync_enabled
            && enabled != cfg.sync.sync_enabled
        {
            cfg.sync.sync_enabled = enabled;
            changed.push("sync_enabled");
        }

        changed
    }

    /// Open the config file in an editor: `--editor`, then `$EDITOR`/`$VISUAL`,
    /// then the platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<String> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        if let Ok(s) = Command::new(&requested).arg(path).status()
            && s.success()
        {
            return Ok(requested);
        }

        let status = Command::new(&default_editor)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if status.success() {
            Ok(default_editor)
        } else {
            Err(AppError::Config(format!(
                "Failed to edit configuration file using '{}'",
                default_editor
            )))
        }
    }
}
