//! The word-guessing engine, a take on hangman with five lives.
//!
//! A `Session` is only ever changed by `Session::apply_guess()`, which takes the session by value
//! and hands back the next one together with a description of what the guess did. `play()` wraps
//! that in the prompt loop.

use anyhow::{Context as _, Result};
use fastrand::Rng;
use regex::Regex;
use tracing::{debug, info};

use crate::input::{Console, Flow};
use crate::messages::{self, InputError};

/// What a line has to look like to count as a guess: letters only, at least one.
pub(crate) const GUESS_PATTERN: &str = r"\A[[:alpha:]]+\z";

/// The lives a session starts with.
pub(crate) const LIVES: u8 = 5;

/// The words a session may draw its secret from. All of them are lowercase ASCII.
pub(crate) const WORDS: [&str; 8] = [
    "password", "dog", "nephew", "cowboy", "lantern", "parlor", "scissors", "terminal",
];

/// What a single guess did to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Feedback {
    /// Every occurrence of the letter was already revealed. Nothing changed.
    AlreadyRevealed(char),
    /// The session was already over. Nothing changed.
    Finished,
    /// The letter revealed `count` new positions.
    Hit {
        /// How many positions were revealed.
        count: usize,
        /// The letter that was guessed.
        letter: char,
    },
    /// The letter isn't in the word and cost a life.
    Miss(char),
    /// The whole word was guessed.
    Solved,
    /// A whole word was guessed, but it wasn't the secret. It cost a life.
    WrongWord(String),
}

/// A guess, as typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Guess {
    /// A single letter.
    Letter(char),
    /// A candidate for the whole word.
    Word(String),
}

impl Guess {
    /// Reads a guess off a line. The line is trimmed and lowercased, then checked against
    /// `guess_re`, which should only let letters through. One letter makes a letter guess, more
    /// make a word guess.
    pub(crate) fn parse(line: &str, guess_re: &Regex) -> Result<Self, InputError> {
        let guess = line.trim().to_lowercase();

        if !guess_re.is_match(&guess) {
            return Err(InputError::Malformed("a letter or a whole word"));
        }

        let mut letters = guess.chars();
        match (letters.next(), letters.next()) {
            (Some(letter), None) => Ok(Self::Letter(letter)),
            _ => Ok(Self::Word(guess)),
        }
    }
}

/// One play-through of the word-guessing game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Session {
    /// The lives left; never below zero.
    lives: u8,
    /// One slot per character of the word; `None` until that position is revealed.
    mask: Vec<Option<char>>,
    /// The letters guessed that aren't in the word, in the order they were tried.
    missed: Vec<char>,
    /// Whether the session is still going.
    status: Status,
    /// The secret, lowercase.
    word: String,
}

impl Session {
    /// Applies one guess and returns the next state of the session.
    ///
    /// A letter reveals every position holding it at no cost, and costs a life if there's none.
    /// Guessing a letter that's already fully revealed changes nothing. A whole word wins outright
    /// when it matches and costs a life otherwise. Once the session is won or lost, guesses are
    /// ignored.
    #[must_use]
    pub(crate) fn apply_guess(mut self, guess: &Guess) -> (Self, Feedback) {
        if self.status != Status::Ongoing {
            return (self, Feedback::Finished);
        }

        let feedback = match *guess {
            Guess::Letter(letter) => self.reveal(letter.to_ascii_lowercase()),
            Guess::Word(ref word) => self.solve(word),
        };
        self.settle();

        (self, feedback)
    }

    /// Starts a session on a word picked uniformly from `words`. Returns `None` if there's nothing
    /// to pick from.
    pub(crate) fn draw(words: &[&str], rng: &mut Rng) -> Option<Self> {
        rng.choice(words).map(|&word| Self::new(word))
    }

    /// The lives left.
    pub(crate) const fn lives(&self) -> u8 {
        self.lives
    }

    /// The word as the player sees it, with `_` on every hidden position.
    pub(crate) fn masked(&self) -> String {
        self.mask.iter().map(|slot| slot.unwrap_or('_')).collect()
    }

    /// The wrong letters tried so far.
    pub(crate) fn missed(&self) -> &[char] {
        &self.missed
    }

    /// Starts a session on the given word, with every position hidden.
    pub(crate) fn new(word: &str) -> Self {
        let word = word.to_lowercase();

        Self {
            lives: LIVES,
            mask: vec![None; word.chars().count()],
            missed: Vec::new(),
            status: Status::Ongoing,
            word,
        }
    }

    /// Reveals every hidden position holding `letter`.
    fn reveal(&mut self, letter: char) -> Feedback {
        let mut present = false;
        let mut count = 0;

        for (slot, secret) in self.mask.iter_mut().zip(self.word.chars()) {
            if secret == letter {
                present = true;
                if slot.is_none() {
                    *slot = Some(secret);
                    count += 1;
                }
            }
        }

        if count > 0 {
            Feedback::Hit { count, letter }
        } else if present {
            Feedback::AlreadyRevealed(letter)
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.missed.push(letter);
            Feedback::Miss(letter)
        }
    }

    /// Moves the session to a terminal state if it reached one.
    fn settle(&mut self) {
        if self.mask.iter().all(Option::is_some) {
            self.status = Status::Won;
        } else if self.lives == 0 {
            self.status = Status::Lost;
        }
    }

    /// Checks a whole-word guess.
    fn solve(&mut self, word: &str) -> Feedback {
        if word.to_lowercase() == self.word {
            self.mask = self.word.chars().map(Some).collect();
            Feedback::Solved
        } else {
            self.lives = self.lives.saturating_sub(1);
            Feedback::WrongWord(word.to_owned())
        }
    }

    /// Whether the session is won, lost or still going.
    pub(crate) const fn status(&self) -> Status {
        self.status
    }

    /// The secret word.
    pub(crate) fn word(&self) -> &str {
        &self.word
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    /// The lives ran out first.
    Lost,
    /// Still guessing.
    Ongoing,
    /// Every position got revealed, or the word was guessed whole.
    Won,
}

/// Plays one session on a word drawn from `words`, then returns to the menu. Malformed guesses are
/// reported and cost nothing.
///
/// # Errors
///
/// Fails if `words` is empty or the console fails.
pub(crate) fn play<C: Console>(
    console: &mut C,
    rng: &mut Rng,
    words: &[&str],
    guess_re: &Regex,
) -> Result<Flow> {
    let mut session = Session::draw(words, rng).context("the word list is empty")?;
    info!(letters = session.word().len(), "word-guessing session started");
    debug!(word = session.word(), "secret drawn");

    loop {
        console.say(&messages::board(&session))?;

        let Some(line) = console.prompt(&messages::guess_prompt(session.lives()))? else {
            break Ok(Flow::Closed);
        };

        let guess = match Guess::parse(&line, guess_re) {
            Ok(guess) => guess,
            Err(err) => {
                debug!(?err, "guess rejected");
                console.say(&err.to_string())?;
                continue;
            }
        };

        let (next, feedback) = session.apply_guess(&guess);
        session = next;
        debug!(?guess, ?feedback, lives = session.lives(), "guess applied");
        console.say(&messages::feedback(&feedback))?;

        match session.status() {
            Status::Ongoing => {}
            Status::Won => {
                info!(lives = session.lives(), "word-guessing session won");
                console.say(&messages::board(&session))?;
                console.say(&messages::won(session.word()))?;
                break Ok(Flow::Returned);
            }
            Status::Lost => {
                info!("word-guessing session lost");
                console.say(&messages::lost(session.word()))?;
                break Ok(Flow::Returned);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::{prop_assert_eq, prop_assume, proptest, Just, Strategy as _};

    use super::*;
    use crate::input::script::Script;

    fn guess_re() -> Regex {
        Regex::new(GUESS_PATTERN).expect("valid pattern")
    }

    fn guess_all(session: Session, guesses: &[Guess]) -> Session {
        guesses
            .iter()
            .fold(session, |session, guess| session.apply_guess(guess).0)
    }

    #[test]
    fn revealing_letter_by_letter() {
        let session = Session::new("dog");
        assert_eq!(session.masked(), "___");

        let (session, feedback) = session.apply_guess(&Guess::Letter('o'));
        assert_eq!(feedback, Feedback::Hit { count: 1, letter: 'o' });
        assert_eq!(session.masked(), "_o_");

        let (session, _) = session.apply_guess(&Guess::Letter('d'));
        assert_eq!(session.masked(), "do_");
        assert_eq!(session.status(), Status::Ongoing);

        let (session, _) = session.apply_guess(&Guess::Letter('g'));
        assert_eq!(session.masked(), "dog");
        assert_eq!(session.status(), Status::Won);
        assert_eq!(session.lives(), LIVES);
    }

    #[test]
    fn five_misses_lose_the_session() {
        let mut session = Session::new("dog");

        for (letter, lives) in ['x', 'y', 'z', 'q', 'w'].into_iter().zip([4, 3, 2, 1, 0]) {
            let (next, feedback) = session.apply_guess(&Guess::Letter(letter));
            session = next;
            assert_eq!(feedback, Feedback::Miss(letter));
            assert_eq!(session.lives(), lives);
        }

        assert_eq!(session.status(), Status::Lost);
        assert_eq!(session.masked(), "___");
        assert_eq!(session.missed(), ['x', 'y', 'z', 'q', 'w']);
    }

    #[test]
    fn repeated_letters_are_revealed_together() {
        let (session, feedback) = Session::new("password").apply_guess(&Guess::Letter('s'));

        assert_eq!(feedback, Feedback::Hit { count: 2, letter: 's' });
        assert_eq!(session.masked(), "__ss____");
        assert_eq!(session.lives(), LIVES);
    }

    #[test]
    fn revealed_letters_cost_nothing_the_second_time() {
        let session = guess_all(Session::new("nephew"), &[Guess::Letter('e')]);
        let (again, feedback) = session.clone().apply_guess(&Guess::Letter('e'));

        assert_eq!(feedback, Feedback::AlreadyRevealed('e'));
        assert_eq!(again, session);
    }

    #[test]
    fn missed_letters_cost_again() {
        let session = guess_all(
            Session::new("dog"),
            &[Guess::Letter('x'), Guess::Letter('x')],
        );

        assert_eq!(session.lives(), LIVES - 2);
    }

    #[test]
    fn whole_word_guesses() {
        let session = guess_all(Session::new("nephew"), &[Guess::Letter('e')]);

        let (wrong, feedback) = session.clone().apply_guess(&Guess::Word("nephews".to_owned()));
        assert_eq!(feedback, Feedback::WrongWord("nephews".to_owned()));
        assert_eq!(wrong.lives(), LIVES - 1);
        assert_eq!(wrong.masked(), "_e__e_");

        let (right, feedback) = session.apply_guess(&Guess::Word("NEPHEW".to_owned()));
        assert_eq!(feedback, Feedback::Solved);
        assert_eq!(right.status(), Status::Won);
        assert_eq!(right.masked(), "nephew");
        assert_eq!(right.lives(), LIVES);
    }

    #[test]
    fn finished_sessions_are_frozen() {
        let lost = guess_all(
            Session::new("dog"),
            &[
                Guess::Letter('a'),
                Guess::Letter('b'),
                Guess::Letter('c'),
                Guess::Letter('e'),
                Guess::Letter('f'),
            ],
        );
        assert_eq!(lost.status(), Status::Lost);

        let (after, feedback) = lost.clone().apply_guess(&Guess::Word("dog".to_owned()));
        assert_eq!(feedback, Feedback::Finished);
        assert_eq!(after, lost);

        let (after, feedback) = lost.clone().apply_guess(&Guess::Letter('z'));
        assert_eq!(feedback, Feedback::Finished);
        assert_eq!(after.lives(), 0);
    }

    #[test]
    fn parsing_guesses() {
        let re = guess_re();

        assert_eq!(Guess::parse(" D ", &re), Ok(Guess::Letter('d')));
        assert_eq!(
            Guess::parse("Dog\n", &re),
            Ok(Guess::Word("dog".to_owned()))
        );

        for line in ["", "  ", "1", "do g", "d0g", "?"] {
            assert_eq!(
                Guess::parse(line, &re),
                Err(InputError::Malformed("a letter or a whole word")),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn drawing_from_the_word_list() {
        let mut rng = Rng::with_seed(3);

        for _ in 0..20 {
            let session = Session::draw(&WORDS, &mut rng).expect("non-empty list");
            assert!(WORDS.contains(&session.word()), "drew {}", session.word());
            assert_eq!(session.masked().len(), session.word().len());
        }

        assert_eq!(Session::draw(&[], &mut rng), None);
    }

    #[test]
    fn playing_to_a_win() {
        let mut script = Script::new(&["o", "7", "d", "g", "never read"]);
        let flow = play(&mut script, &mut Rng::with_seed(9), &["dog"], &guess_re()).ok();

        assert_eq!(flow, Some(Flow::Returned));
        assert!(script.printed("Congratulations"), "{:?}", script.output());
        assert_eq!(script.count("Invalid input"), 1);
        assert_eq!(script.remaining(), 1);
        assert!(
            script.prompts().iter().all(|prompt| prompt.contains("5 lives")),
            "no life should be lost: {:?}",
            script.prompts()
        );
    }

    #[test]
    fn playing_to_a_loss_reveals_the_word() {
        let mut script = Script::new(&["x", "y", "cat", "q", "w"]);
        let flow = play(&mut script, &mut Rng::with_seed(9), &["dog"], &guess_re()).ok();

        assert_eq!(flow, Some(Flow::Returned));
        assert!(script.printed("The word was 'dog'"), "{:?}", script.output());
        assert!(script.printed("You died"), "{:?}", script.output());
    }

    #[test]
    fn closed_input_closes_the_game() {
        let mut script = Script::new(&["d"]);
        let flow = play(&mut script, &mut Rng::with_seed(9), &["dog"], &guess_re()).ok();

        assert_eq!(flow, Some(Flow::Closed));
    }

    #[test]
    fn empty_word_list_is_an_error() {
        let mut script = Script::new(&["d"]);

        assert!(play(&mut script, &mut Rng::with_seed(9), &[], &guess_re()).is_err());
    }

    proptest! {
        #[test]
        fn revealing_each_letter_once_wins(
            (word, letters) in "[a-z]{1,12}".prop_flat_map(|word| {
                let mut letters: Vec<char> = word.chars().collect();
                letters.sort_unstable();
                letters.dedup();
                (Just(word), Just(letters).prop_shuffle())
            })
        ) {
            let guesses: Vec<Guess> = letters.into_iter().map(Guess::Letter).collect();
            let session = guess_all(Session::new(&word), &guesses);

            prop_assert_eq!(session.status(), Status::Won);
            prop_assert_eq!(session.masked(), word);
            prop_assert_eq!(session.lives(), LIVES);
        }

        #[test]
        fn absent_letters_cost_exactly_one_life(
            word in "[a-m]{1,10}",
            letter in proptest::char::range('n', 'z'),
        ) {
            let session = Session::new(&word);
            let (next, _) = session.clone().apply_guess(&Guess::Letter(letter));

            prop_assert_eq!(next.lives(), session.lives() - 1);
            prop_assert_eq!(next.masked(), session.masked());
        }

        #[test]
        fn lives_bottom_out_at_zero(
            word in "[a-m]{1,10}",
            misses in proptest::collection::vec(proptest::char::range('n', 'z'), 5..20),
        ) {
            let guesses: Vec<Guess> = misses.into_iter().map(Guess::Letter).collect();
            let session = guess_all(Session::new(&word), &guesses);

            prop_assert_eq!(session.lives(), 0);
            prop_assert_eq!(session.status(), Status::Lost);
        }

        #[test]
        fn the_whole_word_wins_at_any_point(
            word in "[a-z]{2,10}",
            letters in proptest::collection::vec(proptest::char::range('a', 'z'), 0..4),
        ) {
            let guesses: Vec<Guess> = letters.into_iter().map(Guess::Letter).collect();
            let session = guess_all(Session::new(&word), &guesses);
            prop_assume!(session.status() == Status::Ongoing);

            let (solved, feedback) = session.clone().apply_guess(&Guess::Word(word.clone()));

            prop_assert_eq!(feedback, Feedback::Solved);
            prop_assert_eq!(solved.status(), Status::Won);
            prop_assert_eq!(solved.lives(), session.lives());
            prop_assert_eq!(solved.masked(), word);
        }
    }
}
