//! Append-only session log file.
//!
//! One file per logging session, named `[<start timestamp>] <base>[-<n>]`.
//! Every write opens the file, appends one line, syncs and closes it again, so
//! a line that was reported written survives a crash right after the call.
//! The only destructive operation is [`SessionLog::undo_last_tunnel_event`],
//! which rewrites the file through a temporary file and an atomic rename.

use crate::core::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::location::LocationSample;
use crate::models::log_entry::{LogEntry, Payload};
use crate::models::tunnel_event::{TUNNEL_MARKER, TunnelEventKind};
use crate::ui::messages::warning;
use crate::utils::time::{elapsed_seconds, format_timestamp};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

pub struct SessionLog {
    path: PathBuf,
    start_date: DateTime<FixedOffset>,
    clock: Arc<dyn Clock>,
    // Serializes appends against the undo rewrite.
    io_lock: Mutex<()>,
}

impl std::fmt::Debug for SessionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLog")
            .field("path", &self.path)
            .field("start_date", &self.start_date)
            .finish()
    }
}

/// File name for attempt `index` (0 = no suffix).
pub fn session_file_name(base_name: &str, start_date: &NaiveDateTime, index: u32) -> String {
    let stamped = format!("[{}] {}", format_timestamp(start_date), base_name);
    if index == 0 {
        stamped
    } else {
        format!("{stamped}-{index}")
    }
}

impl SessionLog {
    /// Create a new, empty log file in `dir`.
    ///
    /// The first free name among `[ts] base`, `[ts] base-1`, `[ts] base-2`, ...
    /// is claimed with `create_new`, so two sessions never share a file.
    pub fn create(
        dir: &Path,
        base_name: &str,
        start_date: DateTime<FixedOffset>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::StorageUnavailable(format!("cannot create '{}': {e}", dir.display()))
        })?;

        let local_start = start_date.naive_local();
        let mut index = 0u32;
        let path = loop {
            let candidate = dir.join(session_file_name(base_name, &local_start, index));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(_) => break candidate,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => index += 1,
                Err(e) => {
                    return Err(AppError::StorageUnavailable(format!(
                        "cannot create '{}': {e}",
                        candidate.display()
                    )));
                }
            }
        };

        Ok(Self::open(path, start_date, clock))
    }

    /// Attach to an existing log file without touching it.
    pub fn open(path: PathBuf, start_date: DateTime<FixedOffset>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path,
            start_date,
            clock,
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn start_date(&self) -> DateTime<FixedOffset> {
        self.start_date
    }

    /// Append one encoded line and sync it to disk.
    ///
    /// Once the line is written it counts as stored: a failed sync is
    /// reported but not returned, since the line is already in the file.
    pub fn append(&self, payload: Payload) -> AppResult<()> {
        let _guard = self.io_lock.lock().unwrap_or_else(|p| p.into_inner());

        let now = self.clock.now();
        let entry = LogEntry::new(
            now.naive_local(),
            elapsed_seconds(&self.start_date, &now),
            payload,
        );

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(format!("{}\n", entry.encode()).as_bytes())?;
        if let Err(e) = file.sync_data() {
            warning(format!("Log line written but not synced: {e}"));
        }
        Ok(())
    }

    /// Free text, written verbatim. Failures drop the line and are reported.
    pub fn write_message(&self, text: &str) {
        if let Err(e) = self.append(Payload::Message(text.to_string())) {
            warning(format!("Dropped log message '{text}': {e}"));
        }
    }

    /// GPS sample. Failures drop the sample and are reported.
    pub fn write_location(&self, sample: &LocationSample) {
        if let Err(e) = self.append(Payload::Location(*sample)) {
            warning(format!("Dropped location sample: {e}"));
        }
    }

    pub fn write_tunnel_event(&self, kind: TunnelEventKind) -> AppResult<()> {
        self.append(Payload::Tunnel(kind))
    }

    /// Remove the last tunnel event line and return its kind.
    ///
    /// `Ok(None)` means there was nothing to undo and the file was not touched.
    /// An `Err` means the file could not be read or the rewrite could not be
    /// committed; in both cases the file still holds its previous content.
    pub fn undo_last_tunnel_event(&self) -> AppResult<Option<TunnelEventKind>> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        self.undo_last_tunnel_event_in(dir)
    }

    /// Undo with the rewrite staged in `scratch`, which must share a
    /// filesystem with the log for the final rename to be atomic.
    fn undo_last_tunnel_event_in(&self, scratch: &Path) -> AppResult<Option<TunnelEventKind>> {
        let _guard = self.io_lock.lock().unwrap_or_else(|p| p.into_inner());

        let content = fs::read_to_string(&self.path)?;
        let mut lines: Vec<&str> = content.lines().collect();

        let found = lines.iter().enumerate().rev().find_map(|(idx, line)| {
            let payload = LogEntry::payload_text(line);
            if !payload.contains(TUNNEL_MARKER) {
                return None;
            }
            TunnelEventKind::from_payload(payload).map(|kind| (idx, kind))
        });

        let Some((idx, kind)) = found else {
            return Ok(None);
        };

        lines.remove(idx);
        self.replace_contents(scratch, &lines)?;
        Ok(Some(kind))
    }

    fn replace_contents(&self, scratch: &Path, lines: &[&str]) -> AppResult<()> {
        let corrupt = |e: io::Error| AppError::CorruptRewrite(e.to_string());

        let mut tmp = NamedTempFile::new_in(scratch).map_err(corrupt)?;
        for line in lines {
            writeln!(tmp, "{line}").map_err(corrupt)?;
        }
        tmp.as_file().sync_all().map_err(corrupt)?;

        if let Ok(meta) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), meta.permissions()).map_err(corrupt)?;
        }

        tmp.persist(&self.path).map_err(|e| corrupt(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn log_in(dir: &Path) -> SessionLog {
        let start = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2018, 7, 23, 9, 30, 0)
            .unwrap();
        SessionLog::create(dir, "test", start, Arc::new(FixedClock::new(start))).unwrap()
    }

    #[test]
    fn failed_rewrite_is_reported_and_keeps_the_file() {
        let dir = tempdir().unwrap();
        let log = log_in(dir.path());
        log.write_message("START LOGGING");
        log.write_tunnel_event(TunnelEventKind::EnterTunnel).unwrap();
        let before = fs::read(log.path()).unwrap();

        let missing = dir.path().join("gone");
        let err = log.undo_last_tunnel_event_in(&missing).unwrap_err();

        assert!(matches!(err, AppError::CorruptRewrite(_)));
        assert_eq!(fs::read(log.path()).unwrap(), before);

        // The log is still usable afterwards.
        assert_eq!(
            log.undo_last_tunnel_event().unwrap(),
            Some(TunnelEventKind::EnterTunnel)
        );
    }
}
