//! Reads a finished session log back and pairs tunnel events into segments,
//! each correlated with the GPS fix last seen before the event.

use crate::errors::AppResult;
use crate::models::location::LocationSample;
use crate::models::log_entry::{LogEntry, Payload};
use crate::models::tunnel_event::TunnelEventKind;
use crate::utils::time::format_timestamp;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TunnelSegment {
    pub number: u32,
    pub enter_time: String,
    pub enter_elapsed: i64,
    pub exit_time: Option<String>,
    pub exit_elapsed: Option<i64>,
    pub enter_location: Option<LocationSample>,
    pub exit_location: Option<LocationSample>,
    /// Question marks set while in this tunnel or after it, before the next one.
    pub question_marks: u32,
}

impl TunnelSegment {
    pub fn duration_seconds(&self) -> Option<i64> {
        self.exit_elapsed.map(|exit| exit - self.enter_elapsed)
    }

    pub fn is_closed(&self) -> bool {
        self.exit_elapsed.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub segments: Vec<TunnelSegment>,
    pub location_samples: usize,
    pub messages: usize,
    /// Question marks set before the first tunnel.
    pub early_question_marks: u32,
    /// Exit events without an open tunnel.
    pub unmatched_exits: usize,
    pub skipped_lines: usize,
}

impl SessionReport {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_lines(content.lines()))
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut report = SessionReport::default();
        let entries = lines.into_iter().filter(|l| !l.trim().is_empty()).filter_map(|l| {
            LogEntry::parse(l)
                .inspect_err(|_| report.skipped_lines += 1)
                .ok()
        });
        let entries: Vec<LogEntry> = entries.collect();
        report.replay(&entries);
        report
    }

    fn replay(&mut self, entries: &[LogEntry]) {
        let mut last_fix: Option<LocationSample> = None;
        let mut open = false;

        for entry in entries {
            match &entry.payload {
                Payload::Message(_) => self.messages += 1,
                Payload::Location(sample) => {
                    self.location_samples += 1;
                    last_fix = Some(*sample);
                }
                Payload::Tunnel(TunnelEventKind::EnterTunnel) => {
                    self.segments.push(TunnelSegment {
                        number: self.segments.len() as u32 + 1,
                        enter_time: format_timestamp(&entry.timestamp),
                        enter_elapsed: entry.elapsed_seconds,
                        exit_time: None,
                        exit_elapsed: None,
                        enter_location: last_fix,
                        exit_location: None,
                        question_marks: 0,
                    });
                    open = true;
                }
                Payload::Tunnel(TunnelEventKind::ExitTunnel) => match self.segments.last_mut() {
                    Some(segment) if open => {
                        segment.exit_time = Some(format_timestamp(&entry.timestamp));
                        segment.exit_elapsed = Some(entry.elapsed_seconds);
                        segment.exit_location = last_fix;
                        open = false;
                    }
                    _ => self.unmatched_exits += 1,
                },
                Payload::Tunnel(TunnelEventKind::QuestionMark) => match self.segments.last_mut() {
                    Some(segment) => segment.question_marks += 1,
                    None => self.early_question_marks += 1,
                },
            }
        }
    }

    pub fn tunnel_count(&self) -> usize {
        self.segments.len()
    }

    pub fn question_marks(&self) -> u32 {
        self.early_question_marks + self.segments.iter().map(|s| s.question_marks).sum::<u32>()
    }

    /// Seconds spent inside closed tunnels.
    pub fn time_in_tunnels(&self) -> i64 {
        self.segments.iter().filter_map(TunnelSegment::duration_seconds).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
[23-07-18-100000]-[0]-[START LOGGING]
[23-07-18-100001]-[1]-[#LOCATION 47.1 15.4 350 5 3]
[23-07-18-100010]-[10]-[#TUNNEL QM]
[23-07-18-100020]-[20]-[#TUNNEL ENTER]
[23-07-18-100025]-[25]-[#LOCATION 47.2 15.5 360 65 10]
[23-07-18-100040]-[40]-[#TUNNEL QM]
[23-07-18-100100]-[60]-[#TUNNEL EXIT]
garbage line
[23-07-18-100200]-[120]-[#TUNNEL EXIT]
[23-07-18-100300]-[180]-[#TUNNEL ENTER]
[23-07-18-100400]-[240]-[STOP LOGGING]
";

    #[test]
    fn pairs_events_into_segments() {
        let report = SessionReport::from_lines(LOG.lines());
        assert_eq!(report.tunnel_count(), 2);
        assert_eq!(report.messages, 2);
        assert_eq!(report.location_samples, 2);
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.unmatched_exits, 1);
        assert_eq!(report.early_question_marks, 1);
        assert_eq!(report.question_marks(), 2);

        let first = &report.segments[0];
        assert_eq!(first.enter_time, "23-07-18-100020");
        assert_eq!(first.duration_seconds(), Some(40));
        assert_eq!(first.enter_location.unwrap().latitude, 47.1);
        assert_eq!(first.exit_location.unwrap().latitude, 47.2);
        assert_eq!(first.question_marks, 1);

        let second = &report.segments[1];
        assert!(!second.is_closed());
        assert_eq!(report.time_in_tunnels(), 40);
    }

    #[test]
    fn empty_log_gives_empty_report() {
        assert_eq!(SessionReport::from_lines("".lines()), SessionReport::default());
    }
}
