use super::resolve_log_file;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::log_entry::{LogEntry, Payload};
use crate::models::tunnel_event::TunnelEventKind;
use crate::utils::time::format_clock;
use ansi_term::{Colour, Style};
use std::fs;

/// Colour for each kind of payload
fn style_for(payload: &Payload) -> Style {
    match payload {
        Payload::Tunnel(TunnelEventKind::EnterTunnel) => Colour::Green.bold(),
        Payload::Tunnel(TunnelEventKind::ExitTunnel) => Colour::Red.bold(),
        Payload::Tunnel(TunnelEventKind::QuestionMark) => Colour::Yellow.bold(),
        Payload::Location(_) => Colour::Fixed(8).normal(),
        Payload::Message(_) => Colour::Cyan.normal(),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { file } = cmd {
        let path = resolve_log_file(cfg, file);
        let content = fs::read_to_string(&path)?;

        println!("📜 {}\n", path.display());

        for (n, line) in content.lines().enumerate() {
            match LogEntry::parse(line) {
                Ok(entry) => println!(
                    "{:>4}  {}  {}  {}",
                    n + 1,
                    entry.timestamp.format("%H:%M:%S"),
                    format_clock(entry.elapsed_seconds),
                    style_for(&entry.payload).paint(entry.payload.to_text())
                ),
                Err(_) => println!("{:>4}  {}", n + 1, Style::new().dimmed().paint(line)),
            }
        }
    }

    Ok(())
}
