//! Headphone remote input: maps media-button codes and volume changes to
//! logical commands and dispatches them to bound handlers.

use crate::errors::AppResult;
use crate::ui::messages::{error, warning};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

/// Logical buttons the router can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RemoteCommand {
    Toggle,
    Undo,
    Back,
    VolumeUp,
    VolumeDown,
}

/// Platform button codes for each remote command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMap {
    #[serde(default = "default_toggle_codes")]
    pub toggle: Vec<i64>,
    #[serde(default = "default_undo_codes")]
    pub undo: Vec<i64>,
    #[serde(default = "default_back_codes")]
    pub back: Vec<i64>,
}

// Remote-control event subtypes: play/pause, next track + seek forward,
// previous track + seek backward.
fn default_toggle_codes() -> Vec<i64> {
    vec![103]
}
fn default_undo_codes() -> Vec<i64> {
    vec![104, 109]
}
fn default_back_codes() -> Vec<i64> {
    vec![105, 106]
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            toggle: default_toggle_codes(),
            undo: default_undo_codes(),
            back: default_back_codes(),
        }
    }
}

impl ButtonMap {
    pub fn decode(&self, code: i64) -> Option<RemoteCommand> {
        if self.toggle.contains(&code) {
            Some(RemoteCommand::Toggle)
        } else if self.undo.contains(&code) {
            Some(RemoteCommand::Undo)
        } else if self.back.contains(&code) {
            Some(RemoteCommand::Back)
        } else {
            None
        }
    }
}

/// Looping track that keeps the media session (and so the remote) alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepAliveTrack {
    Silence,
    Noise,
}

impl KeepAliveTrack {
    pub fn from_play_noise(play_noise: bool) -> Self {
        if play_noise {
            KeepAliveTrack::Noise
        } else {
            KeepAliveTrack::Silence
        }
    }
}

/// Host audio session the router drives.
pub trait MediaSession: Send {
    fn begin_receiving_remote_events(&mut self);
    fn end_receiving_remote_events(&mut self);
    fn start_keep_alive(&mut self, track: KeepAliveTrack);
    fn stop_keep_alive(&mut self);
    fn set_output_volume(&mut self, level: f32);
}

pub type Handler = Box<dyn FnMut() -> AppResult<()> + Send>;

/// What happened to one incoming remote event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Router inactive, event dropped.
    Inactive,
    /// Unknown code or volume already at the lock level.
    Ignored,
    Unbound(RemoteCommand),
    Handled(RemoteCommand),
    Failed(RemoteCommand),
}

pub struct RemoteCommandRouter {
    active: bool,
    lock_level: f32,
    buttons: ButtonMap,
    track: KeepAliveTrack,
    handlers: HashMap<RemoteCommand, Handler>,
    media: Box<dyn MediaSession>,
}

impl RemoteCommandRouter {
    pub fn new(
        lock_level: f32,
        buttons: ButtonMap,
        track: KeepAliveTrack,
        media: Box<dyn MediaSession>,
    ) -> Self {
        Self {
            active: false,
            lock_level,
            buttons,
            track,
            handlers: HashMap::new(),
            media,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn lock_level(&self) -> f32 {
        self.lock_level
    }

    pub fn track(&self) -> KeepAliveTrack {
        self.track
    }

    /// Bind (or replace) the handler of one command.
    pub fn bind<F>(&mut self, command: RemoteCommand, handler: F)
    where
        F: FnMut() -> AppResult<()> + Send + 'static,
    {
        self.handlers.insert(command, Box::new(handler));
    }

    pub fn unbind(&mut self, command: RemoteCommand) {
        self.handlers.remove(&command);
    }

    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        if active {
            self.media.begin_receiving_remote_events();
            self.media.start_keep_alive(self.track);
        } else {
            self.media.end_receiving_remote_events();
            self.media.stop_keep_alive();
        }
        self.active = active;
    }

    /// Switch the keep-alive track, restarting the loop if it is playing.
    pub fn set_keep_alive_track(&mut self, track: KeepAliveTrack) {
        if track == self.track {
            return;
        }
        self.track = track;
        if self.active {
            self.media.stop_keep_alive();
            self.media.start_keep_alive(track);
        }
    }

    /// Host came back to the foreground: make sure the loop is still running.
    pub fn resume_audio(&mut self) {
        if self.active {
            self.media.start_keep_alive(self.track);
        }
    }

    pub fn on_button_event(&mut self, code: i64) -> Dispatch {
        if !self.active {
            return Dispatch::Inactive;
        }
        match self.buttons.decode(code) {
            Some(command) => self.dispatch(command),
            None => Dispatch::Ignored,
        }
    }

    /// Volume buttons act as two extra remote buttons; the output volume is
    /// forced back to the lock level after each press.
    pub fn on_volume_changed(&mut self, level: f32) -> Dispatch {
        if !self.active {
            return Dispatch::Inactive;
        }
        let command = if level > self.lock_level {
            RemoteCommand::VolumeUp
        } else if level < self.lock_level {
            RemoteCommand::VolumeDown
        } else {
            return Dispatch::Ignored;
        };

        let outcome = self.dispatch(command);
        self.media.set_output_volume(self.lock_level);
        outcome
    }

    fn dispatch(&mut self, command: RemoteCommand) -> Dispatch {
        let Some(handler) = self.handlers.get_mut(&command) else {
            return Dispatch::Unbound(command);
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
            Ok(Ok(())) => Dispatch::Handled(command),
            Ok(Err(e)) => {
                warning(format!("{command:?} handler failed: {e}"));
                Dispatch::Failed(command)
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error(format!("{command:?} handler panicked: {reason}"));
                Dispatch::Failed(command)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_decodes_known_codes() {
        let map = ButtonMap::default();
        assert_eq!(map.decode(103), Some(RemoteCommand::Toggle));
        assert_eq!(map.decode(104), Some(RemoteCommand::Undo));
        assert_eq!(map.decode(109), Some(RemoteCommand::Undo));
        assert_eq!(map.decode(105), Some(RemoteCommand::Back));
        assert_eq!(map.decode(106), Some(RemoteCommand::Back));
        assert_eq!(map.decode(100), None);
    }

    #[test]
    fn custom_map_replaces_codes() {
        let map = ButtonMap {
            toggle: vec![1],
            undo: vec![2],
            back: vec![],
        };
        assert_eq!(map.decode(1), Some(RemoteCommand::Toggle));
        assert_eq!(map.decode(103), None);
    }

    #[test]
    fn track_from_setting() {
        assert_eq!(KeepAliveTrack::from_play_noise(true), KeepAliveTrack::Noise);
        assert_eq!(
            KeepAliveTrack::from_play_noise(false),
            KeepAliveTrack::Silence
        );
    }
}
