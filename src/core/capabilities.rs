//! Services the host environment provides to a logging session.

use std::fs;
use std::path::PathBuf;

/// Spoken status feedback. A new utterance replaces one still playing.
pub trait Speaker: Send {
    fn speak(&mut self, text: &str);
}

/// GPS source. Samples come back through `TunnelLogger::on_location_update`.
pub trait LocationService: Send {
    fn services_enabled(&self) -> bool;
    fn start_updates(&mut self);
    fn stop_updates(&mut self);
}

/// Where session files are written.
pub trait Storage: Send {
    fn location(&self) -> PathBuf;
    fn is_available(&self) -> bool;
}

/// A plain directory on the local file system.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    dir: PathBuf,
}

impl DirectoryStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Storage for DirectoryStorage {
    fn location(&self) -> PathBuf {
        self.dir.clone()
    }

    /// Creates the directory on first use; a read-only directory is unavailable.
    fn is_available(&self) -> bool {
        fs::create_dir_all(&self.dir).is_ok()
            && fs::metadata(&self.dir)
                .map(|m| m.is_dir() && !m.permissions().readonly())
                .unwrap_or(false)
    }
}
