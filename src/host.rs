//! Console stand-ins for the phone's speech, audio and location services.

use crate::core::capabilities::{LocationService, Speaker};
use crate::core::remote::{KeepAliveTrack, MediaSession};
use crate::ui::messages::info;

/// Prints each utterance; the rate is shown so scripted runs match the device.
pub struct ConsoleSpeaker {
    rate: f32,
}

impl ConsoleSpeaker {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }
}

impl Speaker for ConsoleSpeaker {
    fn speak(&mut self, text: &str) {
        println!("🔊 {text}  (rate {:.2})", self.rate);
    }
}

#[derive(Default)]
pub struct ConsoleMediaSession {
    playing: Option<KeepAliveTrack>,
    volume: Option<f32>,
}

impl MediaSession for ConsoleMediaSession {
    fn begin_receiving_remote_events(&mut self) {
        info("Receiving remote control events");
    }

    fn end_receiving_remote_events(&mut self) {
        info("Stopped receiving remote control events");
    }

    fn start_keep_alive(&mut self, track: KeepAliveTrack) {
        if self.playing != Some(track) {
            info(format!("Looping {track:?} track"));
        }
        self.playing = Some(track);
    }

    fn stop_keep_alive(&mut self) {
        if self.playing.take().is_some() {
            info("Keep-alive track stopped");
        }
    }

    fn set_output_volume(&mut self, level: f32) {
        if self.volume != Some(level) {
            info(format!("Output volume locked at {level:.2}"));
        }
        self.volume = Some(level);
    }
}

/// Location samples arrive through the event stream, so the service is
/// always available and start/stop are no-ops.
#[derive(Default)]
pub struct ScriptedLocation;

impl LocationService for ScriptedLocation {
    fn services_enabled(&self) -> bool {
        true
    }

    fn start_updates(&mut self) {}

    fn stop_updates(&mut self) {}
}
