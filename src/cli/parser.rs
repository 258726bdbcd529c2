use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rTunnelLogger
/// Log tunnel entries/exits with GPS samples, driven by remote buttons
#[derive(Parser)]
#[command(
    name = "rtunnellogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log road tunnels against GPS samples from headphone remote buttons, with spoken feedback",
    long_about = None
)]
pub struct Cli {
    /// Override the session log directory
    #[arg(global = true, long = "dir")]
    pub dir: Option<PathBuf>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the log directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Run a logging host that reads remote, volume and location events
    Run {
        /// Read events from a file instead of stdin
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Stop without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List session logs in the log directory
    List,

    /// Print a session log with tunnel events highlighted
    Show {
        /// Session log file (absolute, or relative to the log directory)
        file: PathBuf,
    },

    /// Print the tunnel report of a session log
    Summary {
        file: PathBuf,
    },

    /// Remove the last tunnel event from a session log
    Undo {
        file: PathBuf,
    },

    /// Export the tunnels of a session log
    Export {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "PATH")]
        out: PathBuf,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
