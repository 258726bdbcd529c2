use super::resolve_log_file;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analysis::{SessionReport, TunnelSegment};
use crate::errors::AppResult;
use crate::models::location::LocationSample;
use crate::ui::messages::{header, warning};
use crate::utils::table::Table;
use crate::utils::time::format_clock;

fn fix(loc: &Option<LocationSample>) -> String {
    loc.map(|l| format!("{:.5},{:.5} ±{}m", l.latitude, l.longitude, l.horizontal_accuracy))
        .unwrap_or_else(|| "--".to_string())
}

fn segment_row(s: &TunnelSegment) -> Vec<String> {
    vec![
        s.number.to_string(),
        format_clock(s.enter_elapsed),
        s.exit_elapsed.map(format_clock).unwrap_or_else(|| "--:--:--".into()),
        s.duration_seconds()
            .map(|d| format!("{d}s"))
            .unwrap_or_else(|| "open".into()),
        fix(&s.enter_location),
        fix(&s.exit_location),
        s.question_marks.to_string(),
    ]
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { file } = cmd {
        let path = resolve_log_file(cfg, file);
        let report = SessionReport::from_file(&path)?;

        header(path.display());
        println!("Tunnels          : {}", report.tunnel_count());
        println!("Time in tunnels  : {}", format_clock(report.time_in_tunnels()));
        println!("Question marks   : {}", report.question_marks());
        println!("Location samples : {}", report.location_samples);
        println!("Messages         : {}", report.messages);

        if report.unmatched_exits > 0 {
            warning(format!("{} exit event(s) without an entry", report.unmatched_exits));
        }
        if report.skipped_lines > 0 {
            warning(format!("{} unreadable line(s) skipped", report.skipped_lines));
        }

        if !report.segments.is_empty() {
            let mut table = Table::new([
                "Tunnel",
                "Enter",
                "Exit",
                "Duration",
                "Enter fix",
                "Exit fix",
                "QM",
            ]);
            for s in &report.segments {
                table.add_row(segment_row(s));
            }
            println!();
            print!("{}", table.render());
        }
    }

    Ok(())
}
