pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod run;
pub mod show;
pub mod summary;
pub mod undo;

use crate::config::Config;
use std::path::{Path, PathBuf};

/// A session file given on the command line: used as-is when it exists,
/// otherwise looked up in the log directory.
pub(crate) fn resolve_log_file(cfg: &Config, file: &Path) -> PathBuf {
    if file.exists() || file.is_absolute() {
        file.to_path_buf()
    } else {
        cfg.log_dir().join(file)
    }
}
