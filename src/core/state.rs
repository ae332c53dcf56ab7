//! Game state: players, turn phase and pending roll.
//!
//! ## GameState
//!
//! A complete, self-contained value describing one game:
//! - Players in fixed turn order, each with four token positions
//! - Active seat and turn phase
//! - Pending dice value and the legal-token set it produced
//! - Winner and move history
//!
//! Uses `im` persistent data structures, so snapshots are O(1) to clone and
//! a move replaces only the player it touched.
//!
//! Deserialized snapshots are checked before use: the seat table is rebuilt
//! from the player list, and outcomes, winner and phase must agree with the
//! token positions.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, ColorMap};
use super::config::{validate_players, PlayerConfig, MAX_PLAYERS, MIN_PLAYERS};
use super::error::{CreateGameError, SnapshotError};
use super::history::MoveRecord;
use super::token::{DiceValue, Position, TokenId, TOKENS_PER_PLAYER};
use crate::board::{AbsoluteCell, BoardTopology};

/// Whether a player is still racing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Playing,
    Won,
}

/// One seat: a color, a display name and four tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    pub name: String,
    pub(crate) tokens: [Position; TOKENS_PER_PLAYER],
    pub(crate) outcome: Outcome,
}

impl Player {
    /// A fresh player with every token in base.
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
            tokens: [Position::BASE; TOKENS_PER_PLAYER],
            outcome: Outcome::Playing,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    /// Position of the token in `slot`.
    #[must_use]
    pub fn token(&self, slot: usize) -> Position {
        self.tokens[slot]
    }

    #[must_use]
    pub fn positions(&self) -> &[Position; TOKENS_PER_PLAYER] {
        &self.tokens
    }

    /// Iterate over (TokenId, Position) pairs.
    pub fn tokens(&self) -> impl Iterator<Item = (TokenId, Position)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(slot, &pos)| (TokenId::new(self.color, slot), pos))
    }

    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.tokens.iter().filter(|p| p.is_finished()).count()
    }

    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.finished_count() == TOKENS_PER_PLAYER
    }
}

/// Where the turn state machine currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The active color must roll.
    #[default]
    AwaitingRoll,
    /// A roll is pending and at least one token can move.
    AwaitingSelection,
    /// A roll is pending with nothing to move; waiting for the auto-pass.
    AwaitingPass,
    /// A player has won. Nothing else is accepted.
    GameOver,
}

/// Complete state of one game.
///
/// Read freely; change only through `rules::transition` (or the
/// `TurnEngine` wrapping it).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    pub(crate) players: Vector<Player>,
    #[serde(skip_serializing)]
    pub(crate) seats: ColorMap<Option<usize>>,
    pub(crate) active_seat: usize,
    pub(crate) phase: Phase,
    pub(crate) pending_roll: Option<DiceValue>,
    pub(crate) legal_tokens: SmallVec<[u8; 4]>,
    pub(crate) winner: Option<Color>,
    pub(crate) turn_number: u32,
    pub(crate) history: Vector<MoveRecord>,
}

impl GameState {
    /// Create a game for the given seats. Turn order is input order and
    /// the first seat moves first.
    ///
    /// ## Defaults
    ///
    /// - Every token in base
    /// - `phase`: `AwaitingRoll`
    /// - `turn_number`: 1
    /// - Blank names become `"Player N"` (1-based seat)
    pub fn new(players: &[PlayerConfig]) -> Result<Self, CreateGameError> {
        validate_players(players)?;

        let mut seats = ColorMap::with_default();
        let players: Vector<Player> = players
            .iter()
            .enumerate()
            .map(|(seat, config)| {
                seats[config.color] = Some(seat);
                let name = if config.name.trim().is_empty() {
                    format!("Player {}", seat + 1)
                } else {
                    config.name.clone()
                };
                Player::new(config.color, name)
            })
            .collect();

        Ok(Self {
            players,
            seats,
            active_seat: 0,
            phase: Phase::AwaitingRoll,
            pending_roll: None,
            legal_tokens: SmallVec::new(),
            winner: None,
            turn_number: 1,
            history: Vector::new(),
        })
    }

    /// Place a token directly, for puzzles and tests.
    ///
    /// Only valid while no roll is pending; the player's outcome is
    /// recomputed from the new positions.
    ///
    /// # Panics
    ///
    /// Panics if the color is not seated, a roll is pending, or the game is
    /// over.
    #[must_use]
    pub fn with_token_at(mut self, token: TokenId, position: Position) -> Self {
        assert_eq!(self.phase, Phase::AwaitingRoll, "tokens can only be arranged between turns");
        let seat = self
            .seat_of(token.color)
            .unwrap_or_else(|| panic!("{} is not seated", token.color));
        let player = &mut self.players[seat];
        player.tokens[token.slot()] = position;
        player.outcome = if player.all_finished() {
            Outcome::Won
        } else {
            Outcome::Playing
        };
        if player.outcome == Outcome::Won {
            self.winner = Some(token.color);
            self.phase = Phase::GameOver;
        }
        self
    }

    /// Hand the turn to `color`, for puzzles and tests.
    ///
    /// # Panics
    ///
    /// Panics if the color is not seated or a roll is pending.
    #[must_use]
    pub fn with_active(mut self, color: Color) -> Self {
        assert_eq!(self.phase, Phase::AwaitingRoll, "turn can only be handed over between turns");
        self.active_seat = self
            .seat_of(color)
            .unwrap_or_else(|| panic!("{color} is not seated"));
        self
    }

    // === Players ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Seat index (turn-order position) of a color, if seated.
    #[must_use]
    pub fn seat_of(&self, color: Color) -> Option<usize> {
        self.seats[color]
    }

    #[must_use]
    pub fn player(&self, color: Color) -> Option<&Player> {
        self.seat_of(color).map(|seat| &self.players[seat])
    }

    /// Position of a single token.
    ///
    /// Returns `None` if the token's color is not seated.
    #[must_use]
    pub fn position(&self, token: TokenId) -> Option<Position> {
        self.player(token.color).map(|p| p.token(token.slot()))
    }

    // === Turn ===

    #[must_use]
    pub fn active_seat(&self) -> usize {
        self.active_seat
    }

    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active_seat]
    }

    #[must_use]
    pub fn active_color(&self) -> Color {
        self.active_player().color
    }

    /// Seat that follows the active one in the fixed rotation.
    #[must_use]
    pub fn next_seat(&self) -> usize {
        (self.active_seat + 1) % self.players.len()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn pending_roll(&self) -> Option<DiceValue> {
        self.pending_roll
    }

    /// Token slots of the active player that may move with the pending roll.
    #[must_use]
    pub fn legal_tokens(&self) -> &[u8] {
        &self.legal_tokens
    }

    /// Legal tokens as explicit ids.
    pub fn legal_token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        let color = self.active_color();
        self.legal_tokens
            .iter()
            .map(move |&slot| TokenId::new(color, slot as usize))
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Turn number (starts at 1, increments whenever play passes on).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === Board ===

    /// Map of occupied shared-track cells to the tokens standing there.
    #[must_use]
    pub fn occupancy(&self, board: &BoardTopology) -> FxHashMap<AbsoluteCell, SmallVec<[TokenId; 4]>> {
        let mut map: FxHashMap<AbsoluteCell, SmallVec<[TokenId; 4]>> = FxHashMap::default();
        for player in &self.players {
            for (token, pos) in player.tokens() {
                if let Some(cell) = board.absolute_cell(token.color, pos) {
                    map.entry(cell).or_default().push(token);
                }
            }
        }
        map
    }

    /// Tokens of any color standing on `cell`.
    #[must_use]
    pub fn occupants(&self, board: &BoardTopology, cell: AbsoluteCell) -> SmallVec<[TokenId; 4]> {
        self.players
            .iter()
            .flat_map(|player| player.tokens())
            .filter(|&(token, pos)| board.absolute_cell(token.color, pos) == Some(cell))
            .map(|(token, _)| token)
            .collect()
    }

    // === History ===

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }
}

/// Wire form of `GameState`, validated on the way in.
#[derive(Deserialize)]
struct RawGameState {
    players: Vector<Player>,
    active_seat: usize,
    phase: Phase,
    #[serde(default)]
    pending_roll: Option<DiceValue>,
    #[serde(default)]
    legal_tokens: SmallVec<[u8; 4]>,
    #[serde(default)]
    winner: Option<Color>,
    turn_number: u32,
    #[serde(default)]
    history: Vector<MoveRecord>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = SnapshotError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let count = raw.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(CreateGameError::PlayerCount { count }.into());
        }

        let mut seats: ColorMap<Option<usize>> = ColorMap::with_default();
        for (seat, player) in raw.players.iter().enumerate() {
            if seats[player.color].replace(seat).is_some() {
                return Err(CreateGameError::DuplicateColor {
                    color: player.color,
                }
                .into());
            }
        }

        if raw.active_seat >= count {
            return Err(SnapshotError::ActiveSeat {
                seat: raw.active_seat,
                players: count,
            });
        }

        let mut won = Vec::new();
        for player in &raw.players {
            let finished = player.finished_count();
            match player.outcome {
                Outcome::Won if finished == TOKENS_PER_PLAYER => won.push(player.color),
                Outcome::Playing if finished < TOKENS_PER_PLAYER => {}
                Outcome::Won => {
                    return Err(SnapshotError::Outcome {
                        color: player.color,
                        marked: "won",
                        finished,
                    })
                }
                Outcome::Playing => {
                    return Err(SnapshotError::Outcome {
                        color: player.color,
                        marked: "playing",
                        finished,
                    })
                }
            }
        }
        if won.len() > 1 {
            return Err(SnapshotError::Winners { count: won.len() });
        }
        if raw.winner != won.first().copied() {
            return Err(SnapshotError::Winner { recorded: raw.winner });
        }

        let legal_ok = raw
            .legal_tokens
            .iter()
            .all(|&slot| (slot as usize) < TOKENS_PER_PLAYER)
            && raw.legal_tokens.windows(2).all(|w| w[0] < w[1]);
        let consistent = match raw.phase {
            Phase::GameOver => {
                raw.winner.is_some() && raw.pending_roll.is_none() && raw.legal_tokens.is_empty()
            }
            _ if raw.winner.is_some() => false,
            Phase::AwaitingRoll => raw.pending_roll.is_none() && raw.legal_tokens.is_empty(),
            Phase::AwaitingSelection => {
                raw.pending_roll.is_some() && !raw.legal_tokens.is_empty() && legal_ok
            }
            Phase::AwaitingPass => raw.pending_roll.is_some() && raw.legal_tokens.is_empty(),
        };
        if !consistent {
            return Err(SnapshotError::Phase { phase: raw.phase });
        }

        Ok(Self {
            players: raw.players,
            seats,
            active_seat: raw.active_seat,
            phase: raw.phase,
            pending_roll: raw.pending_roll,
            legal_tokens: raw.legal_tokens,
            winner: raw.winner,
            turn_number: raw.turn_number,
            history: raw.history,
        })
    }
}
