//! The library components of the parlor. They allow starting the menu, taking input from the
//! player, and playing either rock-paper-scissors or the word-guessing game.
//!
//! The starting point of the library is the game.rs file, which contains the menu loop. Each game
//! keeps its rules apart from its prompt loop, and every loop reads through the console seam in
//! input.rs.

#![expect(
    clippy::cargo_common_metadata,
    reason = "The package has not yet been pushed to a remote."
)]

mod game;
mod hangman;
mod input;
mod messages;
mod rps;

pub use game::init;
