//! This module holds every line of text the parlor shows to the player, as well as the error type
//! raised when the player types something that can't be understood at one of the prompts.
//!
//! Nothing in here is fallible; the game loops take these strings and hand them over to whichever
//! console they were given.

use console::style;
use thiserror::Error;

use crate::hangman::{Feedback, Session};
use crate::rps::{Move, RoundOutcome};

/// The line shown before leaving the menu through the exit option.
pub(crate) const FAREWELL: &str = "See you around, partner.";

/// The prompt of the main menu.
pub(crate) const MENU_PROMPT: &str =
    "Pick a game: 1 - rock, paper, scissors | 2 - guess the word | 0 - exit";

/// The prompt of every rock-paper-scissors round.
pub(crate) const MOVE_PROMPT: &str =
    "Make your decision: 1 - rock, 2 - paper, 3 - scissors (0 to go back)";

/// The title line shown once when the program starts.
pub(crate) const WELCOME: &str = "Welcome to the parlor";

/// This enum holds the ways in which a line typed at a prompt can be rejected. None of them are
/// fatal; the loop that raised one prints it and asks again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The line could not be read as what the prompt asked for. The field names what was expected.
    #[error("{}", malformed(.0))]
    Malformed(&'static str),
    /// The line was a number, but not one of the options on offer.
    #[error("{}", out_of_range(.choice, .max))]
    OutOfRange {
        /// The number that was typed.
        choice: u64,
        /// The largest option on offer; the smallest is always zero.
        max: u8,
    },
}

/// Renders the state of a word-guessing session: the mask, the lives left and the missed letters.
pub(crate) fn board(session: &Session) -> String {
    let missed = if session.missed().is_empty() {
        "none".to_owned()
    } else {
        session
            .missed()
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Word: {} | lives: {} | missed: {}",
        style(session.masked()).bold(),
        session.lives(),
        missed
    )
}

/// Describes what a single guess did to the session.
pub(crate) fn feedback(feedback: &Feedback) -> String {
    match *feedback {
        Feedback::AlreadyRevealed(letter) => {
            format!("'{letter}' is already on the board; no life lost.")
        }
        Feedback::Finished => "This round is already over.".to_owned(),
        Feedback::Hit { count: 1, letter } => format!("Good guess! '{letter}' shows up once."),
        Feedback::Hit { count, letter } => {
            format!("Good guess! '{letter}' shows up {count} times.")
        }
        Feedback::Miss(letter) => format!("Sorry, '{letter}' is not in the word."),
        Feedback::Solved => "That's the word!".to_owned(),
        Feedback::WrongWord(ref word) => format!("Sorry, '{word}' is not the word."),
    }
}

/// The prompt of the word-guessing game, which reminds the player of the lives left.
pub(crate) fn guess_prompt(lives: u8) -> String {
    format!("Send a letter or the whole word, you have {lives} lives")
}

/// The closing line of a lost session. The word is revealed here.
pub(crate) fn lost(word: &str) -> String {
    format!(
        "{} The word was '{word}'.",
        style("You died, try again later!").bold().red()
    )
}

/// Builds the message for a malformed input.
fn malformed(expected: &str) -> String {
    format!(
        "{}",
        style(format!("Invalid input; expected {expected}")).bold().underlined()
    )
}

/// Builds the message for a numeric choice that is not on offer.
#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands the variant fields over by reference."
)]
fn out_of_range(choice: &u64, max: &u8) -> String {
    format!(
        "{}",
        style(format!("Invalid input; {choice} is not an option between 0 and {max}"))
            .bold()
            .underlined()
    )
}

/// Reports both moves of a rock-paper-scissors round and who took it.
pub(crate) fn round(player: Move, opponent: Move, outcome: RoundOutcome) -> String {
    let verdict = match outcome {
        RoundOutcome::Draw => "Draw!",
        RoundOutcome::OpponentWin => "AI wins!",
        RoundOutcome::PlayerWin => "Player wins!",
    };

    format!(
        "You chose {player}, the AI chose {opponent}. {}",
        style(verdict).bold()
    )
}

/// The closing line of a won session.
pub(crate) fn won(word: &str) -> String {
    format!(
        "{} The word was '{word}'.",
        style("Congratulations, you did it!").bold().green()
    )
}
