//! Logging session lifecycle: `NotStarted → Active → Stopped`.
//!
//! The controller owns the session log and the tunnel state for the current
//! session and turns every command into a log write plus a spoken status.

use crate::core::capabilities::{LocationService, Speaker, Storage};
use crate::core::clock::Clock;
use crate::core::session_log::SessionLog;
use crate::core::tunnel_state::TunnelStateMachine;
use crate::errors::{AppError, AppResult};
use crate::models::location::LocationSample;
use crate::utils::time::{elapsed_seconds, format_clock};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const START_MESSAGE: &str = "START LOGGING";
pub const STOP_MESSAGE: &str = "STOP LOGGING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    NotStarted,
    Active,
    Stopped,
}

/// What the main screen of the logger shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub tunnel_count: u32,
    pub in_tunnel: bool,
    pub count_label: String,
    pub state_label: String,
    pub elapsed: String,
    pub log_path: Option<PathBuf>,
}

pub struct SessionController {
    state: SessionState,
    base_name: String,
    clock: Arc<dyn Clock>,
    storage: Box<dyn Storage>,
    speaker: Box<dyn Speaker>,
    location: Box<dyn LocationService>,
    tunnels: TunnelStateMachine,
    log: Option<SessionLog>,
}

impl SessionController {
    pub fn new(
        base_name: impl Into<String>,
        clock: Arc<dyn Clock>,
        storage: Box<dyn Storage>,
        speaker: Box<dyn Speaker>,
        location: Box<dyn LocationService>,
    ) -> Self {
        Self {
            state: SessionState::NotStarted,
            base_name: base_name.into(),
            clock,
            storage,
            speaker,
            location,
            tunnels: TunnelStateMachine::new(),
            log: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Log of the current session, or of the last one after it stopped.
    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(SessionLog::path)
    }

    pub fn start_session(&mut self) -> AppResult<PathBuf> {
        if self.state == SessionState::Active {
            return Err(AppError::SessionAlreadyActive);
        }
        if !self.location.services_enabled() {
            return Err(AppError::LocationServicesDisabled);
        }
        let dir = self.storage.location();
        if !self.storage.is_available() {
            return Err(AppError::StorageUnavailable(format!(
                "'{}' is not writable",
                dir.display()
            )));
        }

        let start_date = self.clock.now();
        let log = SessionLog::create(&dir, &self.base_name, start_date, Arc::clone(&self.clock))?;
        log.write_message(START_MESSAGE);
        let path = log.path().to_path_buf();

        self.tunnels.reset();
        self.log = Some(log);
        self.location.start_updates();
        self.state = SessionState::Active;
        Ok(path)
    }

    pub fn stop_session(&mut self) -> AppResult<()> {
        let log = active_log(&self.log, self.state)?;
        log.write_message(STOP_MESSAGE);

        self.tunnels.reset();
        self.location.stop_updates();
        self.state = SessionState::Stopped;
        Ok(())
    }

    /// Enter or leave a tunnel. The state only changes if the event was stored.
    pub fn toggle_tunnel(&mut self) -> AppResult<String> {
        let log = active_log(&self.log, self.state)?;
        let previous = self.tunnels;
        let feedback = self.tunnels.toggle();

        if let Some(event) = feedback.event
            && let Err(e) = log.write_tunnel_event(event)
        {
            self.tunnels = previous;
            self.speaker.speak("Tunnel event could not be saved");
            return Err(e);
        }

        self.speaker.speak(&feedback.status);
        Ok(feedback.status)
    }

    pub fn undo_last(&mut self) -> AppResult<String> {
        let log = active_log(&self.log, self.state)?;
        let undone = match log.undo_last_tunnel_event() {
            Ok(undone) => undone,
            Err(e) => {
                self.speaker.speak("Undo failed");
                return Err(e);
            }
        };

        let status = self.tunnels.undo(undone);
        self.speaker.speak(&status);
        Ok(status)
    }

    pub fn mark_uncertain(&mut self) -> AppResult<String> {
        let log = active_log(&self.log, self.state)?;
        let feedback = self.tunnels.mark_uncertain();

        if let Some(event) = feedback.event
            && let Err(e) = log.write_tunnel_event(event)
        {
            self.speaker.speak("Question mark could not be saved");
            return Err(e);
        }

        self.speaker.speak(&feedback.status);
        Ok(feedback.status)
    }

    pub fn query_status(&mut self) -> AppResult<String> {
        active_log(&self.log, self.state)?;
        let status = self.tunnels.query_status();
        self.speaker.speak(&status);
        Ok(status)
    }

    /// GPS samples are only recorded while a session is active.
    pub fn on_location_update(&mut self, sample: &LocationSample) {
        if let Ok(log) = active_log(&self.log, self.state) {
            log.write_location(sample);
        }
    }

    /// Free-text note in the current session log.
    pub fn note(&mut self, text: &str) -> AppResult<()> {
        active_log(&self.log, self.state)?.write_message(text);
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let elapsed = match (&self.log, self.state) {
            (Some(log), SessionState::Active) => {
                format_clock(elapsed_seconds(&log.start_date(), &self.clock.now()))
            }
            _ => format_clock(0),
        };

        SessionSnapshot {
            state: self.state,
            tunnel_count: self.tunnels.count(),
            in_tunnel: self.tunnels.in_tunnel(),
            count_label: self.tunnels.count_label(),
            state_label: self.tunnels.state_label().to_string(),
            elapsed,
            log_path: self.log_path().map(Path::to_path_buf),
        }
    }
}

/// Field-level borrow of the active session log.
fn active_log(log: &Option<SessionLog>, state: SessionState) -> AppResult<&SessionLog> {
    match (log, state) {
        (Some(log), SessionState::Active) => Ok(log),
        _ => Err(AppError::SessionNotActive),
    }
}
