use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Prefix of a GPS sample line in a session log.
pub const LOCATION_MARKER: &str = "#LOCATION";

/// One GPS fix as delivered by the host location service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub horizontal_accuracy: f64,
    pub vertical_accuracy: f64,
}

impl LocationSample {
    pub fn new(
        latitude: f64,
        longitude: f64,
        altitude: f64,
        horizontal_accuracy: f64,
        vertical_accuracy: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            horizontal_accuracy,
            vertical_accuracy,
        }
    }

    /// Convert sample → payload text.
    /// `{}` on f64 prints the shortest representation that parses back exactly.
    pub fn to_payload(&self) -> String {
        format!(
            "{LOCATION_MARKER} {} {} {} {} {}",
            self.latitude,
            self.longitude,
            self.altitude,
            self.horizontal_accuracy,
            self.vertical_accuracy
        )
    }

    /// Convert payload text → sample
    pub fn from_payload(s: &str) -> Option<Self> {
        let rest = s.strip_prefix(LOCATION_MARKER)?;
        Self::from_fields(rest).ok()
    }

    /// Parse five whitespace separated numbers (lat lon alt hAcc vAcc).
    pub fn from_fields(s: &str) -> AppResult<Self> {
        let values = s
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InvalidLocation(format!("'{}': {e}", s.trim())))?;

        match values.as_slice() {
            [lat, lon, alt, h, v] => Ok(Self::new(*lat, *lon, *alt, *h, *v)),
            _ => Err(AppError::InvalidLocation(format!(
                "expected 5 values, got {} in '{}'",
                values.len(),
                s.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_default_float_formatting() {
        let s = LocationSample::new(47.0707, 15.4395, 353.5, 5.0, 3.0);
        assert_eq!(s.to_payload(), "#LOCATION 47.0707 15.4395 353.5 5 3");
    }

    #[test]
    fn payload_parses_back_exactly() {
        let s = LocationSample::new(0.1 + 0.2, -122.41941550000001, -12.25, 65.0, 10.5);
        assert_eq!(LocationSample::from_payload(&s.to_payload()), Some(s));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert!(LocationSample::from_fields("1 2 3").is_err());
        assert!(LocationSample::from_fields("1 2 3 4 x").is_err());
        assert!(LocationSample::from_payload("#TUNNEL ENTER").is_none());
    }
}
