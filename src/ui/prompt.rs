//! Yes/no questions on the console.

use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Ask `question` and read one answer line from `input`.
/// Only `y` / `yes` (any case) count as yes; end of input is a no.
pub fn ask_yes_no(question: &str, input: &mut dyn BufRead) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn only_yes_answers_confirm() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut input = Cursor::new(answer);
            assert_eq!(ask_yes_no("Go?", &mut input).unwrap(), expected, "{answer:?}");
        }
    }
}
