use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the session log directory
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    println!("⚙️  Initializing rTunnelLogger…");

    cfg.init_all(cli.test)?;

    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("📂 Log folder  : {}", cfg.log_dir().display());

    success("rTunnelLogger initialization completed!");
    Ok(())
}
