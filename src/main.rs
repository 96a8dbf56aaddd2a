//! # parlor
//!
//! This crate is a small console parlor with two games behind a numeric menu: rock-paper-scissors
//! against a random opponent, and a hangman-style game where a secret word has to be guessed one
//! letter at a time, or all at once, before five lives run out.
//!
//! Type `1` or `2` at the menu to pick a game and `0` to leave. Closing the input leaves as well.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use anyhow::Result;
use parlor::init;

fn main() -> Result<()> {
    init()
}
