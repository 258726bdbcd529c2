//! rTunnelLogger main entrypoint.

use rtunnellogger::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
