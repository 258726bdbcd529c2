// src/export/logic.rs

use super::fs_utils::check_export_target;
use super::json_csv::{export_csv, export_json};
use super::{ExportFormat, SegmentExport};
use crate::core::analysis::SessionReport;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::fs;
use std::io;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the tunnel segments of one session log.
    pub fn export(log_file: &Path, format: ExportFormat, out: &Path, force: bool) -> AppResult<()> {
        let report = SessionReport::from_file(log_file)?;
        let rows = Self::rows(&report);

        if rows.is_empty() {
            warning(format!("No tunnels logged in '{}'", log_file.display()));
        }

        check_export_target(out, force, &mut io::stdin().lock())?;
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, out),
            ExportFormat::Json => export_json(&rows, out),
        }
    }

    pub fn rows(report: &SessionReport) -> Vec<SegmentExport> {
        report.segments.iter().map(SegmentExport::from).collect()
    }
}
