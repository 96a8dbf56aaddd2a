//! The game module contains the entry point of the parlor and the menu loop that hands control
//! over to each of the games.
//!
//! It contains the `init()` function to parse the command line, set up logging and the terminal,
//! and run the menu until the player leaves.

use std::io;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use console::{style, Term};
use fastrand::Rng;
use regex::Regex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::hangman::{self, GUESS_PATTERN, WORDS};
use crate::input::{parse_choice, Console, Flow, TermConsole};
use crate::messages::{self, InputError};
use crate::rps;

/// This struct holds the command-line arguments, parsed with clap's derive API. With no arguments
/// at all the parlor plays with a fresh random seed and logs nothing but warnings.
#[derive(Parser)]
#[command(name = "parlor", version, about)]
#[command(next_line_help = true)]
struct Cli {
    /// Seed for the random number generator.
    ///
    /// With a seed, the opponent's moves and the secret words come out in the same order on every
    /// run, which makes a game reproducible.
    #[arg(long)]
    #[arg(env = "PARLOR_SEED", value_name = "SEED")]
    seed: Option<u64>,
    /// Log more; repeat to log even more (-v info, -vv debug, -vvv trace).
    ///
    /// Logs go to the standard error so they don't get mixed up with the game. The RUST_LOG
    /// environment variable takes precedence when it is set.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// The options of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    /// The exit sentinel.
    Exit,
    /// Option `1`.
    RockPaperScissors,
    /// Option `2`.
    WordGuess,
}

impl MenuChoice {
    /// Reads the answer to the menu prompt. `parse_choice()` already turns away anything past `2`.
    fn parse(line: &str) -> Result<Self, InputError> {
        Ok(match parse_choice(line, 2)? {
            0 => Self::Exit,
            1 => Self::RockPaperScissors,
            _ => Self::WordGuess,
        })
    }
}

/// Initializes the parlor and runs it. This is a `main()` function of sorts, though it is still
/// called from main.rs.
///
/// It creates the interface to the standard output and the random number generator, both of which
/// are then handed down to every game instead of being created again on each round.
///
/// # Errors
///
/// The function may return any one of the following errors:
///
/// - clap::Error, through an early exit on bad arguments
/// - regex::Error
/// - io::Error
/// - dialoguer::Error
pub fn init() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let term = Term::stdout();
    let mut rng = cli.seed.map_or_else(Rng::new, Rng::with_seed);
    let guess_re = Regex::new(GUESS_PATTERN)?;
    debug!(seed = ?cli.seed, "parlor starting");

    // show the init message
    init_message(&term)?;

    let mut console = TermConsole::new(term);
    run(&mut console, &mut rng, &WORDS, &guess_re)
}

/// Installs the log subscriber. Everything goes to the standard error.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_unset| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// This function shows the message at the start of the program. On a terminal, the screen is
/// cleared and the title of the window is set to the name of the game first.
fn init_message(term: &Term) -> Result<()> {
    if term.is_term() {
        term.clear_screen()?;
        term.set_title("parlor");
    }

    term.write_line(&format!("{}", style(messages::WELCOME).bold()))?;
    Ok(())
}

/// The menu loop. Each game runs to completion before the menu is shown again; a line that isn't
/// one of the options is reported and asked again. Returns once the player picks the exit option
/// or the input is closed.
pub(crate) fn run<C: Console>(
    console: &mut C,
    rng: &mut Rng,
    words: &[&str],
    guess_re: &Regex,
) -> Result<()> {
    loop {
        let Some(line) = console.prompt(messages::MENU_PROMPT)? else {
            info!("input closed, leaving the parlor");
            break Ok(());
        };

        let choice = match MenuChoice::parse(&line) {
            Ok(choice) => choice,
            Err(err) => {
                debug!(?err, "menu option rejected");
                console.say(&err.to_string())?;
                continue;
            }
        };
        info!(?choice, "menu option picked");

        let flow = match choice {
            MenuChoice::Exit => {
                console.say(messages::FAREWELL)?;
                break Ok(());
            }
            MenuChoice::RockPaperScissors => rps::play(console, rng)?,
            MenuChoice::WordGuess => hangman::play(console, rng, words, guess_re)?,
        };

        if flow == Flow::Closed {
            info!("input closed during a game, leaving the parlor");
            break Ok(());
        }
    }
}
