//! This module contains all functions related to taking input from the player. Every game loop
//! reads through the `Console` trait, so the terminal is only touched by `TermConsole` and the
//! loops can be driven from a script in tests.
//!
//! On a real terminal the prompts go through `dialoguer`; when stdin is piped, lines are read
//! straight from it so that the end of the stream can be noticed and the game closed cleanly.

use std::io::{self, BufRead, BufReader, IsTerminal as _, Stdin};

use anyhow::Result;
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use tracing::trace;

use crate::messages::InputError;

/// This trait is the only way the game loops talk to the player.
pub(crate) trait Console {
    /// Shows `text` as a prompt and waits for a line. Returns `None` once the input has been
    /// closed, which every loop treats as a request to leave.
    fn prompt(&mut self, text: &str) -> Result<Option<String>>;

    /// Writes one line of output.
    fn say(&mut self, line: &str) -> Result<()>;
}

/// This enum tells the menu how a game handed control back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// The input was closed in the middle of the game; the program should end.
    Closed,
    /// The game finished or the player asked to go back to the menu.
    Returned,
}

/// The console used when actually playing, backed by the process' standard streams. Lines are
/// read off `reader` whenever stdin isn't a terminal.
pub(crate) struct TermConsole<R> {
    /// Whether both stdin and stdout are attached to a terminal. If not, `dialoguer` can't be used.
    interactive: bool,
    /// Where piped lines come from.
    reader: R,
    /// The interface to the standard output.
    term: Term,
}

impl TermConsole<BufReader<Stdin>> {
    /// Wraps the given terminal, checking once whether the session is interactive.
    pub(crate) fn new(term: Term) -> Self {
        let interactive = term.is_term() && io::stdin().is_terminal();

        Self {
            interactive,
            reader: BufReader::new(io::stdin()),
            term,
        }
    }
}

impl<R: BufRead> TermConsole<R> {
    /// Builds a console that never prompts through `dialoguer` and reads every line off `reader`.
    #[cfg(test)]
    pub(crate) fn piped(term: Term, reader: R) -> Self {
        Self {
            interactive: false,
            reader,
            term,
        }
    }

    /// Reads one line off the reader, without the line terminator. Bytes that aren't valid UTF-8
    /// are replaced, so the line still reaches the parsers and gets rejected there.
    fn read_piped(&mut self, text: &str) -> Result<Option<String>> {
        self.term.write_line(&format!("{}", style(text).bold()))?;

        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned()))
    }
}

impl<R: BufRead> Console for TermConsole<R> {
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        if !self.interactive {
            return self.read_piped(text);
        }

        let input = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{}", style(text).bold()))
            .allow_empty(true)
            .interact_text_on(&self.term);

        match input {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                trace!("terminal input closed");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        Ok(self.term.write_line(line)?)
    }
}

/// Reads a numeric menu option between zero and `max`, both inclusive.
pub(crate) fn parse_choice(line: &str, max: u8) -> Result<u8, InputError> {
    let choice: u64 = line
        .trim()
        .parse()
        .map_err(|_parse| InputError::Malformed("a number"))?;

    u8::try_from(choice)
        .ok()
        .filter(|option| *option <= max)
        .ok_or(InputError::OutOfRange { choice, max })
}
