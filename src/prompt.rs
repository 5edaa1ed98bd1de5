// src/prompt.rs
// =============================================================================
// A yes/no question on the terminal.
//
// The reader and writer are parameters so the prompt can be driven from a
// test with an in-memory buffer instead of stdin/stdout.
// =============================================================================

use std::io::{self, BufRead, Write};

// Asks `prompt` until the answer is empty, "y" or "n" (any case)
//
// An empty answer picks `default`. The suffix shows the default in brackets:
//   confirm(.., "Create dirs?", false) prints "Create dirs? [n]|y: "
//
// End of input counts as an empty answer, so a closed stdin can't loop forever.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: bool,
) -> io::Result<bool> {
    let prompt = if default {
        format!("{} [y]|n: ", prompt)
    } else {
        format!("{} [n]|y: ", prompt)
    };

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(default);
        }

        match answer.trim_end_matches(&['\r', '\n'][..]).to_lowercase().as_str() {
            "" => return Ok(default),
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(output, "please enter y or n.")?,
        }
    }
}
