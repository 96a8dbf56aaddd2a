//! The rock-paper-scissors engine.
//!
//! The outcome of a round is decided by `play_round()`, which has no side effects at all. `play()`
//! is the loop on top of it: it asks for a move, draws the opponent's from the injected generator
//! and reports who took the round, until the player types the exit sentinel.

use std::fmt;

use anyhow::Result;
use fastrand::Rng;
use tracing::{debug, info};

use crate::input::{parse_choice, Console, Flow};
use crate::messages::{self, InputError};

/// The three moves. The discriminants are the numbers the player types to pick them.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "The variants follow the order in which they are offered at the prompt."
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    /// Beats scissors.
    Rock = 1,
    /// Beats rock.
    Paper = 2,
    /// Beats paper.
    Scissors = 3,
}

impl Move {
    /// Whether this move beats `other`. No move beats itself.
    pub(crate) const fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }

    /// Maps the number typed at the prompt onto a move.
    pub(crate) const fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Rock),
            2 => Some(Self::Paper),
            3 => Some(Self::Scissors),
            _ => None,
        }
    }

    /// Maps a move's name, in any case, onto the move.
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rock" => Some(Self::Rock),
            "paper" => Some(Self::Paper),
            "scissors" => Some(Self::Scissors),
            _ => None,
        }
    }

    /// Draws one of the three moves with equal odds.
    pub(crate) fn random(rng: &mut Rng) -> Self {
        match rng.u8(1..=3) {
            1 => Self::Rock,
            2 => Self::Paper,
            _ => Self::Scissors,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match *self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        })
    }
}

/// What the player typed at the round prompt, once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundChoice {
    /// The exit sentinel; goes back to the menu.
    Exit,
    /// A move to play this round with.
    Play(Move),
}

impl RoundChoice {
    /// Reads the answer to the round prompt: `0` to leave, `1` to `3` or a move's name to play.
    pub(crate) fn parse(line: &str) -> Result<Self, InputError> {
        if let Some(named) = Move::from_name(line) {
            return Ok(Self::Play(named));
        }

        match parse_choice(line, 3)? {
            0 => Ok(Self::Exit),
            choice => Move::from_choice(choice)
                .map(Self::Play)
                .ok_or(InputError::OutOfRange {
                    choice: u64::from(choice),
                    max: 3,
                }),
        }
    }
}

/// The result of a round, from the player's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundOutcome {
    /// Both picked the same move.
    Draw,
    /// The opponent's move beats the player's.
    OpponentWin,
    /// The player's move beats the opponent's.
    PlayerWin,
}

/// Runs rounds until the player types the exit sentinel or the input is closed. A rejected line is
/// reported and asked again, and does not count as a round.
///
/// # Errors
///
/// Only fails if the console does.
pub(crate) fn play<C: Console>(console: &mut C, rng: &mut Rng) -> Result<Flow> {
    info!("rock-paper-scissors started");
    let mut rounds = 0_u32;

    loop {
        let Some(line) = console.prompt(messages::MOVE_PROMPT)? else {
            break Ok(Flow::Closed);
        };

        let player = match RoundChoice::parse(&line) {
            Ok(RoundChoice::Exit) => {
                info!(rounds, "rock-paper-scissors finished");
                break Ok(Flow::Returned);
            }
            Ok(RoundChoice::Play(player)) => player,
            Err(err) => {
                debug!(?err, "move rejected");
                console.say(&err.to_string())?;
                continue;
            }
        };

        let opponent = Move::random(rng);
        let outcome = play_round(player, opponent);
        rounds = rounds.saturating_add(1);
        debug!(%player, %opponent, ?outcome, "round played");

        console.say(&messages::round(player, opponent, outcome))?;
    }
}

/// Decides a round. Identical moves draw; otherwise whoever holds the dominating move wins.
pub(crate) const fn play_round(player: Move, opponent: Move) -> RoundOutcome {
    if player.beats(opponent) {
        RoundOutcome::PlayerWin
    } else if opponent.beats(player) {
        RoundOutcome::OpponentWin
    } else {
        RoundOutcome::Draw
    }
}
