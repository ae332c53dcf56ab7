//! Turn state machine steps.
//!
//! ```text
//! AwaitingRoll --roll--> AwaitingSelection --select--> AwaitingRoll (same or next color)
//!       |                                          \--> GameOver
//!       \--roll (nothing movable)--> AwaitingPass --resolve--> AwaitingRoll
//! ```
//!
//! Each step takes the current state by reference and returns a
//! `Transition` holding the next state. Rejected input leaves the caller's
//! state untouched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::capture::{captures_for, send_to_base};
use super::movement::{destination, legal_tokens};
use crate::board::BoardTopology;
use crate::core::{
    Color, CreateGameError, DiceValue, GameState, MoveRecord, Outcome, Phase, PlayerConfig,
    Position, RejectedInput, RulesConfig, TokenId, TOKENS_PER_PLAYER,
};
use crate::events::{ExtraTurnReason, GameEvent, Intent};

/// Result of one state machine step.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The state after the step.
    pub state: GameState,
    /// Events produced, in order.
    pub events: Vec<GameEvent>,
    /// Auto-resolution the new state is waiting for, if any.
    pub intent: Option<Intent>,
    /// Set when the step moved a token.
    pub moved: Option<MoveOutcome>,
}

impl Transition {
    fn new(state: GameState, events: Vec<GameEvent>) -> Self {
        Self {
            state,
            events,
            intent: None,
            moved: None,
        }
    }
}

/// Summary of an applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub token: TokenId,
    pub dice: DiceValue,
    pub from: Position,
    pub to: Position,
    /// Opponent tokens sent back to base.
    pub captured: SmallVec<[TokenId; 4]>,
    /// The token reached the finish.
    pub reached_home: bool,
    /// Why the mover keeps the turn, if they do.
    pub extra_turn: Option<ExtraTurnReason>,
    /// The move won the game.
    pub victory: bool,
}

/// Create a fresh game. Turn order is input order.
pub fn create_game(players: &[PlayerConfig]) -> Result<GameState, CreateGameError> {
    let state = GameState::new(players)?;
    debug!(players = state.player_count(), first = %state.active_color(), "game created");
    Ok(state)
}

/// The auto-resolution a state is waiting for, if any.
///
/// - `AwaitingPass` on a 6: `AutoReroll`; otherwise `AutoPass`
/// - `AwaitingSelection` with exactly one legal token and
///   `auto_select_forced_move` enabled: `AutoSelect`
#[must_use]
pub fn intent_for(state: &GameState, rules: &RulesConfig) -> Option<Intent> {
    let color = state.active_color();
    match state.phase() {
        Phase::AwaitingPass => match state.pending_roll() {
            Some(roll) if roll.is_six() => Some(Intent::AutoReroll { color }),
            Some(_) => Some(Intent::AutoPass { color }),
            None => None,
        },
        Phase::AwaitingSelection if rules.auto_select_forced_move => {
            match state.legal_tokens() {
                [slot] => Some(Intent::AutoSelect {
                    token: TokenId::new(color, *slot as usize),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Recompute the legal-token set of a pending roll under `rules`.
///
/// Used when a snapshot is resumed with rules that may differ from the ones
/// it was rolled under. The phase follows the recomputed set.
#[must_use]
pub fn reconcile(state: &GameState, rules: &RulesConfig) -> GameState {
    let Some(value) = state.pending_roll() else {
        return state.clone();
    };
    if state.is_over() {
        return state.clone();
    }

    let legal = legal_tokens(state.active_player(), value, rules);
    let mut next = state.clone();
    next.phase = if legal.is_empty() {
        Phase::AwaitingPass
    } else {
        Phase::AwaitingSelection
    };
    if legal != next.legal_tokens {
        debug!(color = %state.active_color(), %value, legal = ?legal.as_slice(), "legal tokens recomputed");
    }
    next.legal_tokens = legal;
    next
}

/// Apply a dice roll for the active color.
pub fn roll(
    state: &GameState,
    value: DiceValue,
    rules: &RulesConfig,
) -> Result<Transition, RejectedInput> {
    match state.phase() {
        Phase::GameOver => return Err(RejectedInput::GameOver),
        Phase::AwaitingRoll => {}
        _ => return Err(RejectedInput::NotAwaitingRoll),
    }

    let color = state.active_color();
    let legal = legal_tokens(state.active_player(), value, rules);

    let mut next = state.clone();
    next.pending_roll = Some(value);
    next.legal_tokens = legal.clone();

    let mut events = vec![GameEvent::DiceRolled {
        color,
        value,
        legal: legal.clone(),
    }];

    if legal.is_empty() {
        next.phase = Phase::AwaitingPass;
        events.push(GameEvent::NoLegalMoves { color, value });
        debug!(%color, %value, "no legal moves");
    } else {
        next.phase = Phase::AwaitingSelection;
        debug!(%color, %value, legal = ?legal.as_slice(), "dice rolled");
    }

    let intent = intent_for(&next, rules);
    let mut transition = Transition::new(next, events);
    transition.intent = intent;
    Ok(transition)
}

/// Move the active color's token in `slot` with the pending roll.
///
/// Resolves captures, finishing, victory and turn continuation.
pub fn select(
    state: &GameState,
    slot: usize,
    board: &BoardTopology,
) -> Result<Transition, RejectedInput> {
    match state.phase() {
        Phase::GameOver => return Err(RejectedInput::GameOver),
        Phase::AwaitingSelection => {}
        _ => return Err(RejectedInput::NotAwaitingSelection),
    }
    let Some(dice) = state.pending_roll() else {
        return Err(RejectedInput::NotAwaitingSelection);
    };
    if slot >= TOKENS_PER_PLAYER {
        return Err(RejectedInput::NoSuchToken { index: slot });
    }

    let color = state.active_color();
    let token = TokenId::new(color, slot);
    if !state.legal_tokens().contains(&(slot as u8)) {
        return Err(RejectedInput::IllegalToken { token });
    }

    let from = state.active_player().token(slot);
    let to = destination(from, dice).expect("legal token has a destination");

    let mut next = state.clone();
    let seat = next.active_seat;
    next.players[seat].tokens[slot] = to;
    let mut events = vec![GameEvent::TokenMoved { token, from, to }];

    // Captures are resolved against the board after the mover has landed.
    let mut captured = SmallVec::<[TokenId; 4]>::new();
    if let Some((cell, victims)) = captures_for(&next, board, token, to) {
        send_to_base(&mut next, &victims);
        for &victim in &victims {
            info!(%victim, by = %token, %cell, "token captured");
            events.push(GameEvent::TokenCaptured {
                token: victim,
                by: token,
                cell,
            });
        }
        captured = victims;
    }

    let reached_home = to.is_finished();
    if reached_home {
        events.push(GameEvent::TokenHome { token });
    }

    next.history.push_back(MoveRecord {
        token,
        dice,
        from,
        to,
        captured: captured.clone(),
        turn: next.turn_number,
        sequence: next.history.len() as u32,
    });
    next.pending_roll = None;
    next.legal_tokens.clear();

    debug!(%token, %from, %to, %dice, captures = captured.len(), "token moved");

    let mut outcome = MoveOutcome {
        token,
        dice,
        from,
        to,
        captured,
        reached_home,
        extra_turn: None,
        victory: false,
    };

    if next.players[seat].all_finished() {
        next.players[seat].outcome = Outcome::Won;
        next.winner = Some(color);
        next.phase = Phase::GameOver;
        events.push(GameEvent::Victory { color });
        info!(%color, turn = next.turn_number, "game won");

        outcome.victory = true;
        let mut transition = Transition::new(next, events);
        transition.moved = Some(outcome);
        return Ok(transition);
    }

    let extra_turn = if !outcome.captured.is_empty() {
        Some(ExtraTurnReason::Capture)
    } else if reached_home {
        Some(ExtraTurnReason::TokenHome)
    } else if dice.is_six() {
        Some(ExtraTurnReason::RolledSix)
    } else {
        None
    };

    match extra_turn {
        Some(reason) => events.push(GameEvent::ExtraTurn { color, reason }),
        None => events.push(pass_turn(&mut next)),
    }
    next.phase = Phase::AwaitingRoll;

    outcome.extra_turn = extra_turn;
    let mut transition = Transition::new(next, events);
    transition.moved = Some(outcome);
    Ok(transition)
}

/// Apply an auto-resolution intent.
///
/// The intent must match the state: `AutoPass`/`AutoReroll` need a pending
/// unplayable roll for that color, `AutoSelect` a legal token of the active
/// color.
pub fn resolve(
    state: &GameState,
    intent: Intent,
    board: &BoardTopology,
) -> Result<Transition, RejectedInput> {
    if state.is_over() {
        return Err(RejectedInput::GameOver);
    }

    match intent {
        Intent::AutoSelect { token } if token.color == state.active_color() => {
            select(state, token.slot(), board)
        }
        Intent::AutoPass { color } | Intent::AutoReroll { color }
            if state.phase() == Phase::AwaitingPass && color == state.active_color() =>
        {
            Ok(settle_unplayable(state))
        }
        _ => Err(RejectedInput::NoPendingIntent),
    }
}

/// Clear an unplayable roll: a 6 rolls again, anything else passes.
fn settle_unplayable(state: &GameState) -> Transition {
    let color = state.active_color();
    let rolled_six = state.pending_roll().is_some_and(DiceValue::is_six);

    let mut next = state.clone();
    next.pending_roll = None;
    next.legal_tokens.clear();
    next.phase = Phase::AwaitingRoll;

    let event = if rolled_six {
        GameEvent::ExtraTurn {
            color,
            reason: ExtraTurnReason::RolledSix,
        }
    } else {
        pass_turn(&mut next)
    };

    Transition::new(next, vec![event])
}

fn pass_turn(state: &mut GameState) -> GameEvent {
    let from: Color = state.active_color();
    state.active_seat = state.next_seat();
    state.turn_number += 1;
    let to = state.active_color();
    debug!(%from, %to, turn = state.turn_number, "turn passed");
    GameEvent::TurnPassed { from, to }
}
