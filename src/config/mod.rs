use crate::core::remote::{ButtonMap, KeepAliveTrack};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_base_name")]
    pub base_name: String,
    #[serde(default = "default_volume_lock_level")]
    pub volume_lock_level: f32,
    #[serde(default)]
    pub play_noise: bool,
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    #[serde(default)]
    pub buttons: ButtonMap,
}

fn default_log_dir() -> String {
    dirs::document_dir()
        .map(|d| d.join("TunnelLogger"))
        .unwrap_or_else(|| Config::config_dir().join("logs"))
        .to_string_lossy()
        .to_string()
}
fn default_base_name() -> String {
    "tunnel-log".to_string()
}
fn default_volume_lock_level() -> f32 {
    0.5
}
fn default_speech_rate() -> f32 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            base_name: default_base_name(),
            volume_lock_level: default_volume_lock_level(),
            play_noise: false,
            speech_rate: default_speech_rate(),
            buttons: ButtonMap::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtunnellogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtunnellogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtunnellogger.conf")
    }

    /// Directory for session files, with `~` expanded.
    pub fn log_dir(&self) -> PathBuf {
        expand_tilde(&self.log_dir)
    }

    pub fn keep_alive_track(&self) -> KeepAliveTrack {
        KeepAliveTrack::from_play_noise(self.play_noise)
    }

    /// Load the configuration file, or defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| AppError::ConfigSave)?;
        }
        fs::write(path, self.to_yaml()?).map_err(|_| AppError::ConfigSave)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.base_name.trim().is_empty() || self.base_name.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "invalid base_name '{}'",
                self.base_name
            )));
        }
        // `-<n>` is reserved for name collisions between sessions.
        let numbered = self
            .base_name
            .rsplit_once('-')
            .is_some_and(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        if numbered {
            return Err(AppError::Config(format!(
                "base_name '{}' must not end in -<number>",
                self.base_name
            )));
        }
        if !(0.0..=1.0).contains(&self.volume_lock_level) {
            return Err(AppError::Config(format!(
                "volume_lock_level must be between 0 and 1, got {}",
                self.volume_lock_level
            )));
        }
        Ok(())
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// the log directory.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;

        if !is_test {
            self.save_to(&Self::config_file())?;
        }

        fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
