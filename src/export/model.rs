// src/export/model.rs

use crate::core::analysis::TunnelSegment;
use crate::models::location::LocationSample;
use serde::Serialize;

/// Flat row for one tunnel: CSV cannot hold nested location structs.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SegmentExport {
    pub tunnel: u32,
    pub enter_time: String,
    pub enter_elapsed: i64,
    pub enter_lat: Option<f64>,
    pub enter_lon: Option<f64>,
    pub enter_alt: Option<f64>,
    pub enter_h_acc: Option<f64>,
    pub exit_time: Option<String>,
    pub exit_elapsed: Option<i64>,
    pub exit_lat: Option<f64>,
    pub exit_lon: Option<f64>,
    pub exit_alt: Option<f64>,
    pub exit_h_acc: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub question_marks: u32,
}

impl From<&TunnelSegment> for SegmentExport {
    fn from(s: &TunnelSegment) -> Self {
        let field =
            |loc: &Option<LocationSample>, f: fn(&LocationSample) -> f64| loc.as_ref().map(f);

        Self {
            tunnel: s.number,
            enter_time: s.enter_time.clone(),
            enter_elapsed: s.enter_elapsed,
            enter_lat: field(&s.enter_location, |l| l.latitude),
            enter_lon: field(&s.enter_location, |l| l.longitude),
            enter_alt: field(&s.enter_location, |l| l.altitude),
            enter_h_acc: field(&s.enter_location, |l| l.horizontal_accuracy),
            exit_time: s.exit_time.clone(),
            exit_elapsed: s.exit_elapsed,
            exit_lat: field(&s.exit_location, |l| l.latitude),
            exit_lon: field(&s.exit_location, |l| l.longitude),
            exit_alt: field(&s.exit_location, |l| l.altitude),
            exit_h_acc: field(&s.exit_location, |l| l.horizontal_accuracy),
            duration_seconds: s.duration_seconds(),
            question_marks: s.question_marks,
        }
    }
}
