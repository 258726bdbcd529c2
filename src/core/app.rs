//! Wires the remote router to the session controller.
//!
//! Handler closures and the host share the controller through one mutex, so
//! appends, undo rewrites and state changes never interleave.

use crate::core::controller::{SessionController, SessionSnapshot};
use crate::core::remote::{Dispatch, KeepAliveTrack, RemoteCommand, RemoteCommandRouter};
use crate::errors::AppResult;
use crate::models::location::LocationSample;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TunnelLogger {
    controller: Arc<Mutex<SessionController>>,
    router: RemoteCommandRouter,
}

fn lock(controller: &Mutex<SessionController>) -> MutexGuard<'_, SessionController> {
    controller.lock().unwrap_or_else(|p| p.into_inner())
}

impl TunnelLogger {
    /// Default wiring: play/pause toggles, skip undoes, volume up sets a
    /// question mark, volume down speaks the status. Back stays unbound.
    pub fn new(controller: SessionController, mut router: RemoteCommandRouter) -> Self {
        let controller = Arc::new(Mutex::new(controller));

        let c = Arc::clone(&controller);
        router.bind(RemoteCommand::Toggle, move || lock(&c).toggle_tunnel().map(drop));
        let c = Arc::clone(&controller);
        router.bind(RemoteCommand::Undo, move || lock(&c).undo_last().map(drop));
        let c = Arc::clone(&controller);
        router.bind(RemoteCommand::VolumeUp, move || lock(&c).mark_uncertain().map(drop));
        let c = Arc::clone(&controller);
        router.bind(RemoteCommand::VolumeDown, move || lock(&c).query_status().map(drop));

        Self { controller, router }
    }

    pub fn start_session(&mut self) -> AppResult<PathBuf> {
        let path = lock(&self.controller).start_session()?;
        self.router.set_active(true);
        Ok(path)
    }

    pub fn stop_session(&mut self) -> AppResult<()> {
        self.router.set_active(false);
        lock(&self.controller).stop_session()
    }

    pub fn on_button_event(&mut self, code: i64) -> Dispatch {
        self.router.on_button_event(code)
    }

    pub fn on_volume_changed(&mut self, level: f32) -> Dispatch {
        self.router.on_volume_changed(level)
    }

    pub fn on_location_update(&mut self, sample: &LocationSample) {
        lock(&self.controller).on_location_update(sample);
    }

    pub fn note(&mut self, text: &str) -> AppResult<()> {
        lock(&self.controller).note(text)
    }

    pub fn resume_audio(&mut self) {
        self.router.resume_audio();
    }

    pub fn set_play_noise(&mut self, play_noise: bool) {
        self.router
            .set_keep_alive_track(KeepAliveTrack::from_play_noise(play_noise));
    }

    pub fn is_active(&self) -> bool {
        self.router.is_active()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.controller).snapshot()
    }

    pub fn router(&self) -> &RemoteCommandRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut RemoteCommandRouter {
        &mut self.router
    }
}
