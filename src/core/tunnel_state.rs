//! In/out tracking for the tunnels of one logging session.

use crate::models::tunnel_event::TunnelEventKind;

/// Result of a transition: the event to log (if any) and the text to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub event: Option<TunnelEventKind>,
    pub status: String,
}

impl Feedback {
    fn new(event: Option<TunnelEventKind>, status: String) -> Self {
        Self { event, status }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TunnelStateMachine {
    count: u32,
    in_tunnel: bool,
}

impl TunnelStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn in_tunnel(&self) -> bool {
        self.in_tunnel
    }

    fn position_word(&self) -> &'static str {
        if self.in_tunnel { "in" } else { "past" }
    }

    pub fn toggle(&mut self) -> Feedback {
        if !self.in_tunnel {
            self.count += 1;
            self.in_tunnel = true;
            Feedback::new(
                Some(TunnelEventKind::EnterTunnel),
                format!("Entering Tunnel {}", self.count),
            )
        } else {
            self.in_tunnel = false;
            Feedback::new(
                Some(TunnelEventKind::ExitTunnel),
                format!("Exiting Tunnel {}", self.count),
            )
        }
    }

    /// Roll back the transition matching the event just removed from the log.
    /// `None` means the log had nothing to undo.
    pub fn undo(&mut self, undone: Option<TunnelEventKind>) -> String {
        match undone {
            Some(TunnelEventKind::EnterTunnel) => {
                let status = format!("Undone Entering Tunnel {}", self.count);
                self.count = self.count.saturating_sub(1);
                self.in_tunnel = false;
                status
            }
            Some(TunnelEventKind::ExitTunnel) => {
                let status = format!("Undone Exiting Tunnel {}", self.count);
                self.in_tunnel = true;
                status
            }
            Some(TunnelEventKind::QuestionMark) => "Undone Setting Question Mark".to_string(),
            None => "No Tunnel Events to undo yet".to_string(),
        }
    }

    pub fn mark_uncertain(&self) -> Feedback {
        let status = if self.count > 0 {
            format!(
                "Setting Question Mark {} Tunnel {}",
                self.position_word(),
                self.count
            )
        } else {
            "Setting Question Mark prior to logging any tunnels".to_string()
        };
        Feedback::new(Some(TunnelEventKind::QuestionMark), status)
    }

    pub fn query_status(&self) -> String {
        if self.count > 0 {
            format!("Currently {} Tunnel {}", self.position_word(), self.count)
        } else {
            "No Tunnels logged yet".to_string()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Counter label, e.g. "3 Tunnels logged".
    pub fn count_label(&self) -> String {
        format!("{} Tunnels logged", self.count)
    }

    /// "In Tunnel" or "Outside".
    pub fn state_label(&self) -> &'static str {
        if self.in_tunnel { "In Tunnel" } else { "Outside" }
    }
}
