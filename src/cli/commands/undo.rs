use super::resolve_log_file;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::session_log::SessionLog;
use crate::core::sessions::SessionFile;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Local;
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Undo { file } = cmd {
        let path = resolve_log_file(cfg, file);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        // Undo appends nothing, the start date only names the session.
        let start = SessionFile::from_path(&path)
            .and_then(|s| s.start_date.and_local_timezone(Local).earliest())
            .map(|dt| dt.fixed_offset())
            .unwrap_or_else(|| clock.now());

        let log = SessionLog::open(path, start, clock);
        match log.undo_last_tunnel_event()? {
            Some(kind) => success(format!(
                "Removed {} from {}",
                kind.to_payload(),
                log.path().display()
            )),
            None => info("No Tunnel Events to undo yet"),
        }
    }

    Ok(())
}
