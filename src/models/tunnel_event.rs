use serde::Serialize;

/// Prefix shared by every tunnel marker in a session log.
pub const TUNNEL_MARKER: &str = "#TUNNEL ";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum TunnelEventKind {
    EnterTunnel,
    ExitTunnel,
    QuestionMark,
}

impl TunnelEventKind {
    /// Short code written after the marker ("ENTER", "EXIT", "QM").
    pub fn code(&self) -> &'static str {
        match self {
            TunnelEventKind::EnterTunnel => "ENTER",
            TunnelEventKind::ExitTunnel => "EXIT",
            TunnelEventKind::QuestionMark => "QM",
        }
    }

    /// Convert enum → payload text
    pub fn to_payload(&self) -> String {
        format!("{TUNNEL_MARKER}{}", self.code())
    }

    /// Convert payload text → enum.
    /// The payload only has to contain the full marker, trailing text is ignored.
    pub fn from_payload(s: &str) -> Option<Self> {
        [Self::EnterTunnel, Self::ExitTunnel, Self::QuestionMark]
            .into_iter()
            .find(|kind| s.contains(&kind.to_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_text_matches_log_format() {
        assert_eq!(TunnelEventKind::EnterTunnel.to_payload(), "#TUNNEL ENTER");
        assert_eq!(TunnelEventKind::ExitTunnel.to_payload(), "#TUNNEL EXIT");
        assert_eq!(TunnelEventKind::QuestionMark.to_payload(), "#TUNNEL QM");
    }

    #[test]
    fn from_payload_ignores_trailing_text() {
        assert_eq!(
            TunnelEventKind::from_payload("#TUNNEL EXIT]"),
            Some(TunnelEventKind::ExitTunnel)
        );
        assert_eq!(TunnelEventKind::from_payload("#TUNNEL SIDEWAYS"), None);
        assert_eq!(TunnelEventKind::from_payload("ENTER"), None);
    }
}
