//! Turn engine: one running game session.
//!
//! ## Usage
//!
//! ```
//! use ludo_engine::core::{Color, GameConfig, Phase, ScriptedDice};
//! use ludo_engine::engine::TurnEngine;
//!
//! let config = GameConfig::for_colors(&[Color::Red, Color::Blue]);
//! let mut engine = TurnEngine::new(config, ScriptedDice::from_values(&[6, 3])).unwrap();
//!
//! // Red rolls a 6 and brings a token out.
//! engine.roll_dice().unwrap();
//! let step = engine.select_token(0).unwrap();
//! assert!(step.moved.unwrap().extra_turn.is_some());
//!
//! // A 3 with one token out is a forced move: the engine offers to play it.
//! let step = engine.roll_dice().unwrap();
//! let ticket = step.intent.unwrap().ticket;
//! engine.resolve_intent(ticket).unwrap();
//! assert_eq!(engine.active_color(), Color::Blue);
//! assert_eq!(engine.phase(), Phase::AwaitingRoll);
//! ```

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::board::{AbsoluteCell, BoardTopology};
use crate::core::{
    Color, CreateGameError, DiceSource, DiceValue, GameConfig, GameRng, GameState, MoveRecord,
    Phase, RejectedInput, RulesConfig, TokenId,
};
use crate::events::{GameEvent, Intent, PendingIntent};
use crate::rules::{self, MoveOutcome, Transition};

/// What one engine call did.
#[derive(Clone, Debug, Default)]
pub struct Step {
    /// The dice value applied, for roll calls.
    pub dice: Option<DiceValue>,
    /// Events produced, in order.
    pub events: Vec<GameEvent>,
    /// Set when a token moved.
    pub moved: Option<MoveOutcome>,
    /// The auto-resolution now pending, if any.
    pub intent: Option<PendingIntent>,
}

/// A single game session.
///
/// Owns the only mutable `GameState` of the game. All operations either
/// apply completely or are rejected with state unchanged.
pub struct TurnEngine<D = GameRng> {
    state: GameState,
    rules: RulesConfig,
    board: &'static BoardTopology,
    dice: D,
    pending: Option<PendingIntent>,
    next_ticket: u64,
}

impl TurnEngine<GameRng> {
    /// Create a session rolling with a seeded `GameRng`.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, CreateGameError> {
        Self::new(config, GameRng::new(seed))
    }
}

impl<D: DiceSource> TurnEngine<D> {
    /// Create a session for a validated table.
    pub fn new(config: GameConfig, dice: D) -> Result<Self, CreateGameError> {
        let state = rules::create_game(&config.players)?;
        Ok(Self::from_state(state, config.rules, dice))
    }

    /// Resume from an existing state snapshot.
    ///
    /// A pending roll's legal-token set is recomputed under `config`, so the
    /// snapshot may have been rolled under different rules. If the snapshot
    /// is waiting on an auto-resolution, a fresh intent ticket is issued for
    /// it.
    pub fn from_state(state: GameState, config: RulesConfig, dice: D) -> Self {
        let mut engine = Self {
            state: rules::reconcile(&state, &config),
            rules: config,
            board: BoardTopology::global(),
            dice,
            pending: None,
            next_ticket: 1,
        };
        engine.pending = rules::intent_for(&engine.state, &engine.rules)
            .map(|intent| engine.issue(intent));
        engine
    }

    // === Operations ===

    /// Roll the dice source for the active color and apply the value.
    ///
    /// The dice source is not consulted when the roll would be rejected.
    pub fn roll_dice(&mut self) -> Result<Step, RejectedInput> {
        match self.state.phase() {
            Phase::GameOver => return Err(self.reject("roll", RejectedInput::GameOver)),
            Phase::AwaitingRoll => {}
            _ => return Err(self.reject("roll", RejectedInput::NotAwaitingRoll)),
        }
        let value = self.dice.roll();
        self.submit_roll(value)
    }

    /// Apply an externally produced dice value for the active color.
    pub fn submit_roll(&mut self, value: DiceValue) -> Result<Step, RejectedInput> {
        let transition = rules::roll(&self.state, value, &self.rules)
            .map_err(|err| self.reject("roll", err))?;
        let mut step = self.apply(transition);
        step.dice = Some(value);
        Ok(step)
    }

    /// Move the active color's token in slot `index` with the pending roll.
    ///
    /// Cancels any pending auto-resolution.
    pub fn select_token(&mut self, index: usize) -> Result<Step, RejectedInput> {
        let transition = rules::select(&self.state, index, self.board)
            .map_err(|err| self.reject("select", err))?;
        Ok(self.apply(transition))
    }

    /// Apply the pending auto-resolution identified by `ticket`.
    ///
    /// Rejected if the ticket has been superseded by another operation.
    pub fn resolve_intent(&mut self, ticket: u64) -> Result<Step, RejectedInput> {
        if self.state.is_over() {
            return Err(self.reject("resolve", RejectedInput::GameOver));
        }
        let pending = match self.pending {
            None => return Err(self.reject("resolve", RejectedInput::NoPendingIntent)),
            Some(pending) if pending.ticket != ticket => {
                return Err(self.reject("resolve", RejectedInput::StaleIntent { ticket }))
            }
            Some(pending) => pending,
        };

        let transition = rules::resolve(&self.state, pending.intent, self.board)
            .map_err(|err| self.reject("resolve", err))?;
        Ok(self.apply(transition))
    }

    /// Apply the pending auto-resolution immediately, whatever its ticket.
    pub fn settle(&mut self) -> Result<Step, RejectedInput> {
        match self.pending {
            Some(pending) => self.resolve_intent(pending.ticket),
            None if self.state.is_over() => Err(self.reject("settle", RejectedInput::GameOver)),
            None => Err(self.reject("settle", RejectedInput::NoPendingIntent)),
        }
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned snapshot of the current state (O(1)).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn board(&self) -> &'static BoardTopology {
        self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn active_color(&self) -> Color {
        self.state.active_color()
    }

    /// Token slots the active color may move with the pending roll.
    #[must_use]
    pub fn legal_tokens(&self) -> &[u8] {
        self.state.legal_tokens()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    #[must_use]
    pub fn pending_intent(&self) -> Option<PendingIntent> {
        self.pending
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        self.state.history()
    }

    /// Tokens standing on a shared-track cell.
    #[must_use]
    pub fn occupants(&self, cell: AbsoluteCell) -> SmallVec<[TokenId; 4]> {
        self.state.occupants(self.board, cell)
    }

    /// Access the dice source (for inspection in tests and replays).
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    // === Internals ===

    fn apply(&mut self, transition: Transition) -> Step {
        let Transition {
            state,
            events,
            intent,
            moved,
        } = transition;

        if let Some(cancelled) = self.pending.take() {
            debug!(ticket = cancelled.ticket, "intent cleared");
        }
        self.state = state;
        self.pending = intent.map(|intent| self.issue(intent));

        Step {
            dice: None,
            events,
            moved,
            intent: self.pending,
        }
    }

    fn issue(&mut self, intent: Intent) -> PendingIntent {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        debug!(ticket, ?intent, "intent issued");
        PendingIntent {
            ticket,
            intent,
            delay: self.rules.auto_resolve_delay(),
        }
    }

    fn reject(&self, operation: &'static str, err: RejectedInput) -> RejectedInput {
        warn!(operation, color = %self.state.active_color(), phase = ?self.state.phase(), %err, "input rejected");
        err
    }
}

impl<D> std::fmt::Debug for TurnEngine<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("state", &self.state)
            .field("rules", &self.rules)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
