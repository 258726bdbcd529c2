use super::{location::LocationSample, tunnel_event::TunnelEventKind};
use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Separator between the bracketed fields of one line.
pub const FIELD_DELIMITER: &str = "]-[";

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}-\d{2}-\d{2}-\d{6})\]-\[(-?\d+)\]-\[(.*)\]$").expect("valid line regex")
});

/// What a log line carries after its timestamp fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Message(String),
    Location(LocationSample),
    Tunnel(TunnelEventKind),
}

impl Payload {
    /// Classify raw payload text the same way the log reader does.
    pub fn classify(text: &str) -> Self {
        if let Some(kind) = TunnelEventKind::from_payload(text) {
            return Payload::Tunnel(kind);
        }
        if let Some(sample) = LocationSample::from_payload(text) {
            return Payload::Location(sample);
        }
        Payload::Message(text.to_string())
    }

    pub fn to_text(&self) -> String {
        match self {
            Payload::Message(text) => text.clone(),
            Payload::Location(sample) => sample.to_payload(),
            Payload::Tunnel(kind) => kind.to_payload(),
        }
    }

    pub fn tunnel_kind(&self) -> Option<TunnelEventKind> {
        match self {
            Payload::Tunnel(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// One line of a session log: `[DD-MM-YY-HHMMSS]-[elapsed]-[payload]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub elapsed_seconds: i64,
    pub payload: Payload,
}

impl LogEntry {
    pub fn new(timestamp: NaiveDateTime, elapsed_seconds: i64, payload: Payload) -> Self {
        Self {
            timestamp,
            elapsed_seconds,
            payload,
        }
    }

    /// Encode without the trailing newline.
    pub fn encode(&self) -> String {
        format!(
            "[{}]-[{}]-[{}]",
            format_timestamp(&self.timestamp),
            self.elapsed_seconds,
            self.payload.to_text()
        )
    }

    pub fn parse(line: &str) -> AppResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let caps = LINE_RE
            .captures(line)
            .ok_or_else(|| AppError::InvalidLogLine(line.to_string()))?;

        let timestamp = parse_timestamp(&caps[1])?;
        let elapsed_seconds = caps[2]
            .parse::<i64>()
            .map_err(|_| AppError::InvalidLogLine(line.to_string()))?;

        Ok(Self::new(timestamp, elapsed_seconds, Payload::classify(&caps[3])))
    }

    /// Raw payload text of an encoded line: everything after the last `]-[`.
    /// Lines without the delimiter are returned whole.
    pub fn payload_text(line: &str) -> &str {
        line.rsplit_once(FIELD_DELIMITER)
            .map(|(_, rest)| rest)
            .unwrap_or(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 7, 23)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn encodes_tunnel_line() {
        let e = LogEntry::new(ts(), 42, Payload::Tunnel(TunnelEventKind::EnterTunnel));
        assert_eq!(e.encode(), "[23-07-18-090507]-[42]-[#TUNNEL ENTER]");
    }

    #[test]
    fn parses_each_payload_kind() {
        let msg = LogEntry::parse("[23-07-18-090507]-[0]-[START LOGGING]").unwrap();
        assert_eq!(msg.payload, Payload::Message("START LOGGING".into()));
        assert_eq!(msg.timestamp, ts());

        let loc = LogEntry::parse("[23-07-18-090507]-[3]-[#LOCATION 1.5 2 3 4 5]\n").unwrap();
        assert_eq!(
            loc.payload,
            Payload::Location(LocationSample::new(1.5, 2.0, 3.0, 4.0, 5.0))
        );

        let qm = LogEntry::parse("[23-07-18-090507]-[9]-[#TUNNEL QM]").unwrap();
        assert_eq!(qm.payload.tunnel_kind(), Some(TunnelEventKind::QuestionMark));
        assert_eq!(qm.elapsed_seconds, 9);
    }

    #[test]
    fn message_with_brackets_survives() {
        let e = LogEntry::new(ts(), 1, Payload::Message("a]-[b".into()));
        let back = LogEntry::parse(&e.encode()).unwrap();
        assert_eq!(back.payload, Payload::Message("a]-[b".into()));
    }

    #[test]
    fn rejects_garbage() {
        assert!(LogEntry::parse("hello").is_err());
        assert!(LogEntry::parse("[23-07-18]-[1]-[x]").is_err());
        assert!(LogEntry::parse("[99-99-18-090507]-[1]-[x]").is_err());
    }

    #[test]
    fn payload_text_takes_last_field() {
        assert_eq!(
            LogEntry::payload_text("[23-07-18-090507]-[4]-[#TUNNEL EXIT]"),
            "#TUNNEL EXIT]"
        );
        assert_eq!(LogEntry::payload_text("no fields"), "no fields");
    }
}
