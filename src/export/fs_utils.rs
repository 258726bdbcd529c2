// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::ui::prompt::ask_yes_no;
use std::io::BufRead;
use std::path::Path;

/// An existing export is only replaced with `--force` or after the user
/// agrees on `input`.
pub(crate) fn check_export_target(
    path: &Path,
    force: bool,
    input: &mut dyn BufRead,
) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("{} already holds an export", path.display()));
    if ask_yes_no("Replace it with the tunnels of this session?", input)? {
        info(format!("Replacing {}", path.display()));
        Ok(())
    } else {
        Err(AppError::Export(format!("kept {}", path.display())))
    }
}
