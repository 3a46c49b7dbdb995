//! Interactive yes/no and choice prompts on stdin.

use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask before overwriting an existing file. EOF counts as "no".
pub fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));

    let answer = ask("Overwrite? [y/N]: ")?.unwrap_or_default();
    let ans = answer.to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Print `question` and read one trimmed line. `None` on end of input.
pub fn ask(question: &str) -> AppResult<Option<String>> {
    print!("{question}");
    io::stdout().flush().ok();

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        println!();
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
