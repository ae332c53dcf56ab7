//! Dice sources: seeded deterministic RNG and scripted sequences.
//!
//! ## Key Features
//!
//! - **Pluggable**: the engine rolls through the `DiceSource` trait
//! - **Deterministic**: same seed produces an identical roll sequence
//! - **Serializable**: O(1) state capture and restore for replays
//! - **Scriptable**: `ScriptedDice` replays a fixed sequence in tests
//!
//! ## Usage
//!
//! ```
//! use ludo_engine::core::{DiceSource, GameRng, ScriptedDice};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll(), b.roll());
//!
//! let mut scripted = ScriptedDice::from_values(&[6, 3]);
//! assert_eq!(scripted.roll().get(), 6);
//! assert_eq!(scripted.roll().get(), 3);
//! assert_eq!(scripted.roll().get(), 6); // wraps around
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::token::DiceValue;

/// Something that produces die faces uniformly over `1..=6`.
pub trait DiceSource {
    /// Roll one die.
    fn roll(&mut self) -> DiceValue;
}

/// Deterministic RNG for dice rolls.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self) -> DiceValue {
        let face: u8 = self.inner.gen_range(1..=6);
        DiceValue::new(face).expect("gen_range(1..=6) yields a die face")
    }
}

/// Serializable RNG state for replays.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of rolls, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    values: Vec<DiceValue>,
    cursor: usize,
}

impl ScriptedDice {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<DiceValue>) -> Self {
        assert!(!values.is_empty(), "Scripted dice need at least one value");
        Self { values, cursor: 0 }
    }

    /// Build from raw faces.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or any face is outside `1..=6`.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        let values = values
            .iter()
            .map(|&v| DiceValue::new(v).unwrap_or_else(|| panic!("invalid die face {v}")))
            .collect();
        Self::new(values)
    }

    /// Number of rolls made so far.
    #[must_use]
    pub fn rolls_made(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DiceValue {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self) -> DiceValue {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_faces() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        let faces_a: Vec<u8> = (0..100).map(|_| a.roll().get()).collect();
        let faces_b: Vec<u8> = (0..100).map(|_| b.roll().get()).collect();
        assert_eq!(faces_a, faces_b);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_seeds_diverge() {
        let mut low = GameRng::new(1);
        let mut high = GameRng::new(2);
        let low_faces: Vec<DiceValue> = std::iter::repeat_with(|| low.roll()).take(20).collect();
        let high_faces: Vec<DiceValue> = std::iter::repeat_with(|| high.roll()).take(20).collect();
        assert_ne!(low_faces, high_faces);
    }

    #[test]
    fn test_rolls_cover_all_faces() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let face = rng.roll().get();
            assert!((1..=6).contains(&face));
            seen[face as usize - 1] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_resume_mid_game() {
        let mut dice = GameRng::new(9);
        (0..37).for_each(|_| {
            dice.roll();
        });

        let saved = serde_json::to_string(&dice.state()).unwrap();
        let upcoming: Vec<u8> = (0..12).map(|_| dice.roll().get()).collect();

        let saved: GameRngState = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved.seed, 9);
        let mut resumed = GameRng::from_state(&saved);
        let replayed: Vec<u8> = (0..12).map(|_| resumed.roll().get()).collect();
        assert_eq!(upcoming, replayed);
    }

    #[test]
    fn test_scripted_wraps() {
        let mut dice = ScriptedDice::from_values(&[1, 2]);
        let faces: Vec<_> = (0..5).map(|_| dice.roll().get()).collect();
        assert_eq!(faces, vec![1, 2, 1, 2, 1]);
        assert_eq!(dice.rolls_made(), 5);
    }

    #[test]
    #[should_panic(expected = "invalid die face")]
    fn test_scripted_rejects_bad_face() {
        let _ = ScriptedDice::from_values(&[0]);
    }

    #[test]
    fn test_boxed_source() {
        let mut dice: Box<dyn DiceSource> = Box::new(ScriptedDice::from_values(&[4]));
        assert_eq!(dice.roll().get(), 4);
    }
}
