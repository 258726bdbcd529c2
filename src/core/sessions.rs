//! Session files in the log directory.

use crate::errors::AppResult;
use crate::utils::time::parse_timestamp;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}-\d{2}-\d{2}-\d{6})\] (.+?)(?:-(\d+))?$").expect("valid name regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub path: PathBuf,
    pub start_date: NaiveDateTime,
    pub base_name: String,
    /// Collision suffix, 0 when the name had none.
    pub index: u32,
}

impl SessionFile {
    /// Recognise `[DD-MM-YY-HHMMSS] <base>[-<n>]` file names.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let caps = NAME_RE.captures(name)?;
        let start_date = parse_timestamp(&caps[1]).ok()?;
        let index = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        Some(Self {
            path: path.to_path_buf(),
            start_date,
            base_name: caps[2].to_string(),
            index,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// All session files in `dir`, oldest first. A missing directory has none.
pub fn list_sessions(dir: &Path) -> AppResult<Vec<SessionFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(session) = SessionFile::from_path(&entry.path()) {
            sessions.push(session);
        }
    }

    sessions.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then(a.base_name.cmp(&b.base_name))
            .then(a.index.cmp(&b.index))
    });
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_suffixed_names() {
        let plain = SessionFile::from_path(Path::new("/logs/[23-07-18-093000] test")).unwrap();
        assert_eq!(plain.base_name, "test");
        assert_eq!(plain.index, 0);

        let second = SessionFile::from_path(Path::new("[23-07-18-093000] test-1")).unwrap();
        assert_eq!(second.base_name, "test");
        assert_eq!(second.index, 1);
        assert_eq!(second.start_date, plain.start_date);
    }

    #[test]
    fn base_names_may_contain_dashes() {
        let s = SessionFile::from_path(Path::new("[23-07-18-093000] tunnel-log-12")).unwrap();
        assert_eq!(s.base_name, "tunnel-log");
        assert_eq!(s.index, 12);
    }

    #[test]
    fn other_files_are_ignored() {
        assert!(SessionFile::from_path(Path::new("notes.txt")).is_none());
        assert!(SessionFile::from_path(Path::new("[2018-07-23] test")).is_none());
    }
}
