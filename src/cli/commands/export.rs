use super::resolve_log_file;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        format,
        out,
        force,
    } = cmd
    {
        let log_file = resolve_log_file(cfg, file);
        ExportLogic::export(&log_file, *format, out, *force)?;
    }
    Ok(())
}
