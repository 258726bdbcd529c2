use crate::config::Config;
use crate::core::analysis::SessionReport;
use crate::core::sessions::list_sessions;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let dir = cfg.log_dir();
    let sessions = list_sessions(&dir)?;

    if sessions.is_empty() {
        info(format!("No session logs in {}", dir.display()));
        return Ok(());
    }

    let mut table = Table::new(["#", "Started", "File", "Tunnels", "Samples"]);
    for (i, s) in sessions.iter().enumerate() {
        let (tunnels, samples) = match SessionReport::from_file(&s.path) {
            Ok(r) => (r.tunnel_count().to_string(), r.location_samples.to_string()),
            Err(e) => {
                warning(format!("{}: {e}", s.file_name()));
                ("?".to_string(), "?".to_string())
            }
        };
        table.add_row(vec![
            (i + 1).to_string(),
            s.start_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            s.file_name(),
            tunnels,
            samples,
        ]);
    }

    println!("📂 {}\n", dir.display());
    print!("{}", table.render());
    Ok(())
}
