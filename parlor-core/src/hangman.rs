//! Hangman: a three-level word-guessing state machine.
//!
//! Words are drawn per level, every round grants six attempts, and solving
//! words moves the player up through the levels. A hint unlocks when the
//! player is down to two attempts and can be taken once per round. The engine
//! returns typed outcomes; rendering the gallows is a front-end concern.

use lazy_static::lazy_static;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const MAX_ATTEMPTS: u8 = 6;
/// Solved words needed to reach level 2.
pub const LEVEL_TWO_AT: u32 = 5;
/// Solved words needed to reach level 3.
pub const LEVEL_THREE_AT: u32 = 15;
/// Remaining attempts at which the hint unlocks.
pub const HINT_AT: u8 = 2;

const NO_HINT: &str = "No hint available";

const LEVEL_ONE_WORDS: &[&str] = &[
    "python", "developer", "computer", "hangman", "program", "apple", "table", "chair", "house",
    "train",
];

const LEVEL_TWO_WORDS: &[&str] = &[
    "keyboard",
    "algorithm",
    "function",
    "variable",
    "internet",
    "syntax",
    "compiler",
    "software",
    "hardware",
    "database",
    "monitor",
    "printer",
    "package",
    "library",
    "storage",
    "network",
];

const LEVEL_THREE_WORDS: &[&str] = &[
    "asynchronous",
    "polymorphism",
    "inheritance",
    "encapsulation",
    "abstraction",
    "multithreading",
    "concurrency",
    "optimization",
    "recursion",
    "serialization",
    "virtualization",
    "cryptography",
    "authentication",
    "authorization",
    "microservices",
];

lazy_static! {
    static ref HINTS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("PYTHON", "A popular programming language.");
        map.insert("DEVELOPER", "A person who writes code.");
        map.insert("COMPUTER", "Electronic device for processing data.");
        map.insert("HANGMAN", "The game you are playing!");
        map.insert("PROGRAM", "Set of instructions executed by a computer.");
        map.insert("APPLE", "A popular fruit that keeps the doctor away.");
        map.insert("TABLE", "Furniture used to place items on.");
        map.insert("CHAIR", "Something you sit on.");
        map.insert("HOUSE", "A place where people live.");
        map.insert("TRAIN", "A vehicle that runs on tracks.");
        map.insert("KEYBOARD", "Input device with letters and keys.");
        map.insert("ALGORITHM", "Step-by-step problem-solving method.");
        map.insert("FUNCTION", "Reusable block of code in programming.");
        map.insert("VARIABLE", "Used to store data in programming.");
        map.insert("INTERNET", "Global network connecting computers.");
        map.insert("SYNTAX", "Rules for writing code.");
        map.insert("COMPILER", "Converts code into machine language.");
        map.insert("SOFTWARE", "Programs running on computers.");
        map.insert("HARDWARE", "Physical components of a computer.");
        map.insert("DATABASE", "Structured collection of data.");
        map.insert("MONITOR", "Screen that displays computer output.");
        map.insert("PRINTER", "Device used to print documents.");
        map.insert("PACKAGE", "Collection of modules or software components.");
        map.insert("LIBRARY", "Collection of code modules for reuse.");
        map.insert("STORAGE", "Place to save files or data.");
        map.insert("NETWORK", "Connected computers exchanging information.");
        map.insert("ASYNCHRONOUS", "Execution not happening at the same time.");
        map.insert("POLYMORPHISM", "OOP concept: same interface, different forms.");
        map.insert("INHERITANCE", "OOP: child class gets features of parent.");
        map.insert("ENCAPSULATION", "OOP: keeping data safe inside class.");
        map.insert("ABSTRACTION", "OOP: showing only necessary details.");
        map.insert("MULTITHREADING", "Running multiple threads concurrently.");
        map.insert("CONCURRENCY", "Multiple tasks making progress at the same time.");
        map.insert("OPTIMIZATION", "Making code or process more efficient.");
        map.insert("RECURSION", "Function calls itself.");
        map.insert("SERIALIZATION", "Converting objects into data stream.");
        map.insert("VIRTUALIZATION", "Creating virtual versions of resources.");
        map.insert("CRYPTOGRAPHY", "Science of secure communication.");
        map.insert("AUTHENTICATION", "Verify identity of user.");
        map.insert("AUTHORIZATION", "Giving permissions to user.");
        map.insert("MICROSERVICES", "Small, independent services in an app.");
        map
    };
}

/// Hint text for a word, if the table knows it.
pub fn hint_for(word: &str) -> Option<&'static str> {
    HINTS.get(word.to_uppercase().as_str()).copied()
}

fn words_for_level(level: u8) -> &'static [&'static str] {
    match level {
        1 => LEVEL_ONE_WORDS,
        2 => LEVEL_TWO_WORDS,
        _ => LEVEL_THREE_WORDS,
    }
}

/// What one guess did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Not a letter.
    Invalid,
    /// Letter was guessed earlier this round; no attempt consumed.
    AlreadyGuessed(char),
    /// Letter is in the word. `leveled_up` carries the new level when this
    /// solve crossed a threshold.
    Correct { solved: bool, leveled_up: Option<u8> },
    /// Letter is not in the word.
    Wrong { remaining: u8, hint_unlocked: bool },
    /// That miss was the last attempt; the word is revealed.
    Lost { word: String },
    /// The round already ended; start the next round first.
    RoundOver,
}

/// One hangman game across rounds and levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HangmanGame {
    level: u8,
    solved_words: u32,
    word: String,
    guessed: BTreeSet<char>,
    remaining_attempts: u8,
    hint_unlocked: bool,
    hint_taken: bool,
}

impl HangmanGame {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self {
            level: 1,
            solved_words: 0,
            word: String::new(),
            guessed: BTreeSet::new(),
            remaining_attempts: MAX_ATTEMPTS,
            hint_unlocked: false,
            hint_taken: false,
        };
        game.next_round(rng);
        game
    }

    /// Draws a fresh word for the current level and resets the round.
    pub fn next_round<R: Rng>(&mut self, rng: &mut R) {
        let words = words_for_level(self.level);
        self.word = words[rng.gen_range(0..words.len())].to_uppercase();
        self.guessed.clear();
        self.remaining_attempts = MAX_ATTEMPTS;
        self.hint_unlocked = false;
        self.hint_taken = false;
    }

    /// Back to level 1 with a fresh word and zero solved words.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.level = 1;
        self.solved_words = 0;
        self.next_round(rng);
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.round_over() {
            return GuessOutcome::RoundOver;
        }
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Invalid;
        }
        if !self.guessed.insert(letter) {
            return GuessOutcome::AlreadyGuessed(letter);
        }

        if self.word.contains(letter) {
            if self.is_solved() {
                self.solved_words += 1;
                let leveled_up = self.check_level_up();
                GuessOutcome::Correct {
                    solved: true,
                    leveled_up,
                }
            } else {
                GuessOutcome::Correct {
                    solved: false,
                    leveled_up: None,
                }
            }
        } else {
            self.remaining_attempts -= 1;
            if self.remaining_attempts == HINT_AT {
                self.hint_unlocked = true;
            }
            if self.remaining_attempts == 0 {
                GuessOutcome::Lost {
                    word: self.word.clone(),
                }
            } else {
                GuessOutcome::Wrong {
                    remaining: self.remaining_attempts,
                    hint_unlocked: self.hint_available(),
                }
            }
        }
    }

    fn check_level_up(&mut self) -> Option<u8> {
        if self.level == 1 && self.solved_words >= LEVEL_TWO_AT {
            self.level = 2;
            Some(2)
        } else if self.level == 2 && self.solved_words >= LEVEL_THREE_AT {
            self.level = 3;
            Some(3)
        } else {
            None
        }
    }

    /// Takes the hint if it is available this round. Consumes it.
    pub fn take_hint(&mut self) -> Option<&'static str> {
        if !self.hint_available() {
            return None;
        }
        self.hint_taken = true;
        Some(hint_for(&self.word).unwrap_or(NO_HINT))
    }

    pub fn hint_available(&self) -> bool {
        self.hint_unlocked && !self.hint_taken && !self.round_over()
    }

    /// The word with unguessed letters as underscores, space-separated in the
    /// traditional style: `P _ T H O N`.
    pub fn masked_word(&self) -> String {
        let mut out = String::with_capacity(self.word.len() * 2);
        for (i, c) in self.word.chars().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(if self.guessed.contains(&c) { c } else { '_' });
        }
        out
    }

    pub fn is_solved(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }

    pub fn is_lost(&self) -> bool {
        self.remaining_attempts == 0 && !self.is_solved()
    }

    pub fn round_over(&self) -> bool {
        self.is_solved() || self.is_lost()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn solved_words(&self) -> u32 {
        self.solved_words
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.remaining_attempts
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Letters guessed this round, in alphabetical order.
    pub fn guessed_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(seed: u64) -> (HangmanGame, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let game = HangmanGame::new(&mut rng);
        (game, rng)
    }

    /// Letters not present in the current word, for forcing misses.
    fn missing_letters(game: &HangmanGame) -> Vec<char> {
        ('A'..='Z').filter(|c| !game.word().contains(*c)).collect()
    }

    fn solve_round(game: &mut HangmanGame) -> GuessOutcome {
        let letters: Vec<char> = game.word().chars().collect();
        let mut last = GuessOutcome::Invalid;
        for letter in letters {
            let outcome = game.guess(letter);
            if outcome != GuessOutcome::AlreadyGuessed(letter) {
                last = outcome;
            }
        }
        last
    }

    #[test]
    fn test_new_game_starts_at_level_one() {
        let (game, _) = game(1);
        assert_eq!(game.level(), 1);
        assert_eq!(game.solved_words(), 0);
        assert_eq!(game.remaining_attempts(), MAX_ATTEMPTS);
        assert!(!game.word().is_empty());
        assert!(game.word().chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_correct_guess_reveals_letter() {
        let (mut game, _) = game(2);
        let first = game.word().chars().next().unwrap();
        let outcome = game.guess(first);
        assert!(matches!(outcome, GuessOutcome::Correct { .. }));
        assert!(game.masked_word().contains(first));
        assert_eq!(game.remaining_attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_wrong_guess_burns_attempt() {
        let (mut game, _) = game(3);
        let miss = missing_letters(&game)[0];
        let outcome = game.guess(miss);
        assert_eq!(
            outcome,
            GuessOutcome::Wrong {
                remaining: MAX_ATTEMPTS - 1,
                hint_unlocked: false,
            }
        );
    }

    #[test]
    fn test_already_guessed_costs_nothing() {
        let (mut game, _) = game(4);
        let miss = missing_letters(&game)[0];
        game.guess(miss);
        let outcome = game.guess(miss);
        assert_eq!(outcome, GuessOutcome::AlreadyGuessed(miss));
        assert_eq!(game.remaining_attempts(), MAX_ATTEMPTS - 1);
    }

    #[test]
    fn test_non_letter_is_invalid() {
        let (mut game, _) = game(5);
        assert_eq!(game.guess('3'), GuessOutcome::Invalid);
        assert_eq!(game.guess(' '), GuessOutcome::Invalid);
        assert_eq!(game.remaining_attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_lowercase_guess_matches() {
        let (mut game, _) = game(6);
        let first = game.word().chars().next().unwrap().to_ascii_lowercase();
        assert!(matches!(game.guess(first), GuessOutcome::Correct { .. }));
    }

    #[test]
    fn test_hint_unlocks_at_two_attempts() {
        let (mut game, _) = game(7);
        let misses = missing_letters(&game);
        assert!(!game.hint_available());
        for miss in misses.iter().take((MAX_ATTEMPTS - HINT_AT) as usize) {
            game.guess(*miss);
        }
        assert_eq!(game.remaining_attempts(), HINT_AT);
        assert!(game.hint_available());

        let hint = game.take_hint();
        assert!(hint.is_some());
        // Once per round.
        assert!(!game.hint_available());
        assert!(game.take_hint().is_none());
    }

    #[test]
    fn test_losing_reveals_word() {
        let (mut game, _) = game(8);
        let word = game.word().to_string();
        let misses = missing_letters(&game);
        let mut last = GuessOutcome::Invalid;
        for miss in misses.iter().take(MAX_ATTEMPTS as usize) {
            last = game.guess(*miss);
        }
        assert_eq!(last, GuessOutcome::Lost { word: word.clone() });
        assert!(game.is_lost());
        assert_eq!(game.guess('A'), GuessOutcome::RoundOver);
    }

    #[test]
    fn test_solving_word_increments_counter() {
        let (mut game, _) = game(9);
        let outcome = solve_round(&mut game);
        assert!(matches!(
            outcome,
            GuessOutcome::Correct { solved: true, .. }
        ));
        assert!(game.is_solved());
        assert_eq!(game.solved_words(), 1);
    }

    #[test]
    fn test_level_up_thresholds() {
        let (mut game, mut rng) = game(10);
        for round in 1..=LEVEL_THREE_AT {
            let outcome = solve_round(&mut game);
            match outcome {
                GuessOutcome::Correct { solved: true, leveled_up } => {
                    if round == LEVEL_TWO_AT {
                        assert_eq!(leveled_up, Some(2));
                    } else if round == LEVEL_THREE_AT {
                        assert_eq!(leveled_up, Some(3));
                    } else {
                        assert_eq!(leveled_up, None);
                    }
                }
                other => panic!("round {round} should solve, got {other:?}"),
            }
            game.next_round(&mut rng);
        }
        assert_eq!(game.level(), 3);
        assert!(LEVEL_THREE_WORDS.contains(&game.word().to_lowercase().as_str()));
    }

    #[test]
    fn test_next_round_keeps_level_and_score() {
        let (mut game, mut rng) = game(11);
        solve_round(&mut game);
        game.next_round(&mut rng);
        assert_eq!(game.solved_words(), 1);
        assert_eq!(game.remaining_attempts(), MAX_ATTEMPTS);
        assert!(!game.round_over());
        assert_eq!(game.guessed_letters().count(), 0);
    }

    #[test]
    fn test_reset_returns_to_level_one() {
        let (mut game, mut rng) = game(12);
        for _ in 0..LEVEL_TWO_AT {
            solve_round(&mut game);
            game.next_round(&mut rng);
        }
        assert_eq!(game.level(), 2);
        game.reset(&mut rng);
        assert_eq!(game.level(), 1);
        assert_eq!(game.solved_words(), 0);
    }

    #[test]
    fn test_masked_word_shape() {
        let (mut game, _) = game(13);
        let len = game.word().chars().count();
        let masked = game.masked_word();
        assert_eq!(masked.chars().filter(|c| *c == '_').count(), len);
        assert_eq!(masked.chars().filter(|c| *c == ' ').count(), len - 1);

        let first = game.word().chars().next().unwrap();
        game.guess(first);
        assert!(game.masked_word().starts_with(first));
    }

    #[test]
    fn test_every_word_has_a_hint() {
        for level in 1..=3 {
            for word in words_for_level(level) {
                assert!(hint_for(word).is_some(), "{word} is missing a hint");
            }
        }
    }
}
