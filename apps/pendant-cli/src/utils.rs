//! Terminal interaction helpers shared by one-shot commands and the REPL.

use std::io::{self, Write};

/// Prompts for a yes/no confirmation, returning `default` on empty input.
pub fn prompt_confirmation(prompt: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{prompt} {hint} ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();

    if input.is_empty() {
        return Ok(default);
    }
    Ok(input == "y" || input == "yes")
}
