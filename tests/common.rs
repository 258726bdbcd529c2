#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeZone};
use rtunnellogger::core::app::TunnelLogger;
use rtunnellogger::core::capabilities::{DirectoryStorage, LocationService, Speaker};
use rtunnellogger::core::clock::FixedClock;
use rtunnellogger::core::controller::SessionController;
use rtunnellogger::core::remote::{ButtonMap, KeepAliveTrack, MediaSession, RemoteCommandRouter};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn rtl() -> Command {
    cargo_bin_cmd!("rtunnellogger")
}

/// 23 July 2018, 09:30 local time (CEST).
pub fn start_date() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2018, 7, 23, 9, 30, 0)
        .unwrap()
}

/// Shared list of everything a fake host service was asked to do.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn push(&self, s: impl Into<String>) {
        self.0.lock().unwrap().push(s.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.0.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub struct FakeSpeaker(pub Recorder);

impl Speaker for FakeSpeaker {
    fn speak(&mut self, text: &str) {
        self.0.push(text);
    }
}

pub struct FakeMedia(pub Recorder);

impl MediaSession for FakeMedia {
    fn begin_receiving_remote_events(&mut self) {
        self.0.push("begin");
    }
    fn end_receiving_remote_events(&mut self) {
        self.0.push("end");
    }
    fn start_keep_alive(&mut self, track: KeepAliveTrack) {
        self.0.push(format!("play {track:?}"));
    }
    fn stop_keep_alive(&mut self) {
        self.0.push("stop");
    }
    fn set_output_volume(&mut self, level: f32) {
        self.0.push(format!("volume {level}"));
    }
}

pub struct FakeLocation {
    pub enabled: bool,
    pub calls: Recorder,
}

impl LocationService for FakeLocation {
    fn services_enabled(&self) -> bool {
        self.enabled
    }
    fn start_updates(&mut self) {
        self.calls.push("start updates");
    }
    fn stop_updates(&mut self) {
        self.calls.push("stop updates");
    }
}

/// Everything a test needs to drive and observe one logger.
pub struct Harness {
    pub app: TunnelLogger,
    pub clock: FixedClock,
    pub speech: Recorder,
    pub media: Recorder,
    pub location: Recorder,
}

pub fn controller(
    dir: &Path,
    clock: &FixedClock,
    speech: &Recorder,
    location: &Recorder,
    location_enabled: bool,
) -> SessionController {
    SessionController::new(
        "test",
        Arc::new(clock.clone()),
        Box::new(DirectoryStorage::new(dir)),
        Box::new(FakeSpeaker(speech.clone())),
        Box::new(FakeLocation {
            enabled: location_enabled,
            calls: location.clone(),
        }),
    )
}

pub fn harness(dir: &Path) -> Harness {
    let clock = FixedClock::new(start_date());
    let speech = Recorder::default();
    let media = Recorder::default();
    let location = Recorder::default();

    let router = RemoteCommandRouter::new(
        0.5,
        ButtonMap::default(),
        KeepAliveTrack::Silence,
        Box::new(FakeMedia(media.clone())),
    );
    let app = TunnelLogger::new(controller(dir, &clock, &speech, &location, true), router);

    Harness {
        app,
        clock,
        speech,
        media,
        location,
    }
}

/// Payload text of every line in a log file, in file order.
pub fn payloads(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| {
            rtunnellogger::models::log_entry::LogEntry::parse(l)
                .unwrap()
                .payload
                .to_text()
        })
        .collect()
}
