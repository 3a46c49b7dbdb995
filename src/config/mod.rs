use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// How a decoded badge is trusted before it can be confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityCheck {
    /// Trust the id, name and mobile embedded in the QR code.
    #[default]
    Payload,
    /// Additionally require the id to be present in the registry.
    Registry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_qr_folder")]
    pub qr_folder: String,
    /// Pixels per QR module in generated badges.
    #[serde(default = "default_qr_module_scale")]
    pub qr_module_scale: u32,
    /// Pause between two camera polls.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub identity_check: IdentityCheck,
    /// Rows shown in the spreadsheet preview before registering.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_qr_folder() -> String {
    Config::config_dir()
        .join("qr_codes")
        .to_string_lossy()
        .to_string()
}
fn default_qr_module_scale() -> u32 {
    8
}
fn default_frame_interval_ms() -> u64 {
    50
}
fn default_preview_rows() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            qr_folder: default_qr_folder(),
            qr_module_scale: default_qr_module_scale(),
            frame_interval_ms: default_frame_interval_ms(),
            identity_check: IdentityCheck::default(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("qrattend")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".qrattend")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("qrattend.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("qrattend.sqlite")
    }

    /// Folder for QR badges, with `~/` expanded.
    pub fn qr_folder_path(&self) -> PathBuf {
        expand_tilde(&self.qr_folder)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Initialize configuration and database files.
    ///
    /// Relative names for the database or QR folder are placed inside the
    /// config directory. In test mode the config file is left untouched.
    pub fn init_all(
        custom_db: Option<String>,
        custom_qr: Option<String>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let resolve = |name: String| {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        };

        let db_path = custom_db
            .map(&resolve)
            .unwrap_or_else(Self::database_file);
        let qr_path = custom_qr
            .map(&resolve)
            .unwrap_or_else(|| PathBuf::from(default_qr_folder()));

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            qr_folder: qr_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::ConfigSave(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&qr_path)?;

        Ok(config)
    }
}
