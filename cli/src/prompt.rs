//! Interactive credential prompts.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Prompt on stderr and read one line from stdin.
pub fn read_line(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        bail!("No input given");
    }
    Ok(line)
}

/// Prompt on stderr and read a line without echoing it.
///
/// Falls back to a plain line read when stdin is not a terminal.
pub fn read_password(prompt: &str) -> Result<String> {
    if atty::isnt(atty::Stream::Stdin) {
        return read_line(prompt);
    }

    eprint!("{}", prompt);
    io::stderr().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden();
    terminal::disable_raw_mode()?;
    eprintln!();

    result
}

fn read_hidden() -> Result<String> {
    let mut secret = String::new();

    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        if kind != KeyEventKind::Press {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("Interrupted")
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}
