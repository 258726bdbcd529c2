//! `run`: a console host for one or more logging sessions.
//!
//! Each input line is one host event:
//!
//! ```text
//! start | stop | status | resume
//! button <code>
//! volume <level>
//! location <lat> <lon> <alt> <hAcc> <vAcc>
//! note <text>
//! noise on|off
//! ```

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::app::TunnelLogger;
use crate::core::capabilities::DirectoryStorage;
use crate::core::clock::{Clock, SystemClock};
use crate::core::controller::SessionController;
use crate::core::remote::{Dispatch, RemoteCommand, RemoteCommandRouter};
use crate::errors::{AppError, AppResult};
use crate::host::{ConsoleMediaSession, ConsoleSpeaker, ScriptedLocation};
use crate::models::location::LocationSample;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_yes_no;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Start,
    Stop,
    Status,
    Resume,
    Button(i64),
    Volume(f32),
    Location(LocationSample),
    Note(String),
    Noise(bool),
}

impl HostEvent {
    pub fn parse(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let bad = || AppError::Other(format!("cannot read event '{line}'"));

        let event = match word.to_lowercase().as_str() {
            "start" => HostEvent::Start,
            "stop" => HostEvent::Stop,
            "status" => HostEvent::Status,
            "resume" => HostEvent::Resume,
            "button" => HostEvent::Button(rest.parse().map_err(|_| bad())?),
            "volume" => HostEvent::Volume(rest.parse().map_err(|_| bad())?),
            "location" => HostEvent::Location(LocationSample::from_fields(rest)?),
            "note" if !rest.is_empty() => HostEvent::Note(rest.to_string()),
            "noise" => match rest {
                "on" => HostEvent::Noise(true),
                "off" => HostEvent::Noise(false),
                _ => return Err(bad()),
            },
            _ => return Err(bad()),
        };
        Ok(event)
    }
}

/// Wire the console host services into a logger configured by `cfg`.
pub fn build_app(cfg: &Config) -> TunnelLogger {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let controller = SessionController::new(
        cfg.base_name.clone(),
        clock,
        Box::new(DirectoryStorage::new(cfg.log_dir())),
        Box::new(ConsoleSpeaker::new(cfg.speech_rate)),
        Box::new(ScriptedLocation),
    );
    let router = RemoteCommandRouter::new(
        cfg.volume_lock_level,
        cfg.buttons.clone(),
        cfg.keep_alive_track(),
        Box::new(ConsoleMediaSession::default()),
    );
    TunnelLogger::new(controller, router)
}

const STOP_QUESTION: &str = "Stop Tunnel Logging? Your log stays in the log folder.";

fn report_dispatch(outcome: Dispatch) {
    match outcome {
        Dispatch::Inactive => warning("Remote ignored: no logging session is active"),
        Dispatch::Ignored => info("Remote event not mapped to any command"),
        Dispatch::Unbound(RemoteCommand::Back) => info("Back button is not assigned"),
        Dispatch::Unbound(command) => info(format!("{command:?} is not assigned")),
        Dispatch::Handled(_) | Dispatch::Failed(_) => {}
    }
}

fn apply(
    app: &mut TunnelLogger,
    event: HostEvent,
    input: &mut dyn BufRead,
    confirm: bool,
) -> AppResult<()> {
    match event {
        HostEvent::Start => {
            let path = app.start_session()?;
            success(format!("Logging to {}", path.display()));
        }
        HostEvent::Stop => {
            if confirm && app.is_active() && !ask_yes_no(STOP_QUESTION, input)? {
                info("Still logging");
                return Ok(());
            }
            app.stop_session()?;
            success("Logging stopped");
        }
        HostEvent::Status => {
            let snap = app.snapshot();
            let router = app.router();
            info(format!(
                "{:?} | {} | {} | {} | {:?} track, volume lock {:.2}",
                snap.state,
                snap.count_label,
                snap.state_label,
                snap.elapsed,
                router.track(),
                router.lock_level()
            ));
        }
        HostEvent::Resume => app.resume_audio(),
        HostEvent::Button(code) => report_dispatch(app.on_button_event(code)),
        HostEvent::Volume(level) => report_dispatch(app.on_volume_changed(level)),
        HostEvent::Location(sample) => app.on_location_update(&sample),
        HostEvent::Note(text) => app.note(&text)?,
        HostEvent::Noise(on) => app.set_play_noise(on),
    }
    Ok(())
}

/// Feed every event of `input` to `app`. Bad lines are reported and skipped;
/// a session still active at the end of input is stopped.
pub fn run_events(app: &mut TunnelLogger, input: &mut dyn BufRead, confirm: bool) -> AppResult<()> {
    let mut line_no = 0usize;
    let mut buf = String::new();

    loop {
        buf.clear();
        if input.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = HostEvent::parse(line).and_then(|ev| apply(app, ev, input, confirm));
        if let Err(e) = result {
            warning(format!("line {line_no}: {e}"));
        }
    }

    if app.is_active() {
        app.stop_session()?;
        success("Input ended, logging stopped");
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run { script, yes } = cmd {
        let mut app = build_app(cfg);

        match script {
            Some(path) => {
                let mut reader = BufReader::new(File::open(path)?);
                run_events(&mut app, &mut reader, false)?;
            }
            None => {
                let stdin = io::stdin();
                let confirm = !*yes && stdin.is_terminal();
                if confirm {
                    info("Type events (start, button 103, volume 0.6, stop, ...)");
                }
                run_events(&mut app, &mut stdin.lock(), confirm)?;
            }
        }

        if let Some(path) = app.snapshot().log_path {
            info(format!("Last session log: {}", path.display()));
        }
    }

    Ok(())
}
