//! Property tests: whole games played with seeded dice and arbitrary token
//! choices must keep every board invariant after every step.

use ludo_engine::board::BoardTopology;
use ludo_engine::core::{
    Color, GameConfig, GameState, Outcome, Phase, Position, RulesConfig, StackingRule, TokenId,
};
use ludo_engine::engine::{Step, TurnEngine};
use ludo_engine::events::GameEvent;
use proptest::prelude::*;

const MAX_STEPS: usize = 50_000;

/// Check everything that must hold between two consecutive states.
fn check_step(before: &GameState, after: &GameState, step: &Step) -> Result<(), TestCaseError> {
    let board = BoardTopology::global();
    let captured: Vec<TokenId> = step
        .moved
        .as_ref()
        .map(|m| m.captured.to_vec())
        .unwrap_or_default();

    // Tokens only move forward, except captured ones going back to base.
    for player in before.players() {
        for (token, from) in player.tokens() {
            let to = after.position(token).unwrap();
            if captured.contains(&token) {
                prop_assert_eq!(to, Position::BASE);
                prop_assert!(from.is_on_track());
            } else {
                prop_assert!(to >= from, "{} went from {} to {}", token, from, to);
            }
            if from.is_finished() {
                prop_assert_eq!(to, Position::FINISHED);
            }
        }
    }

    // Captures never happen on safe cells and never hit the mover's color.
    if let Some(moved) = &step.moved {
        for victim in &moved.captured {
            prop_assert_ne!(victim.color, moved.token.color);
        }
        if !moved.captured.is_empty() {
            prop_assert!(!board.is_safe(moved.token.color, moved.to));
        }
    }
    for event in &step.events {
        if let GameEvent::TokenCaptured { cell, .. } = event {
            prop_assert!(!board.is_safe_cell(*cell));
        }
    }

    // Captures are complete: no plain track cell holds two colors.
    for (cell, tokens) in after.occupancy(board) {
        if !board.is_safe_cell(cell) {
            let color = tokens[0].color;
            prop_assert!(
                tokens.iter().all(|t| t.color == color),
                "{} holds {:?}",
                cell,
                tokens.as_slice()
            );
        }
    }

    // Turn passes only to the next seat, and only with a TurnPassed event.
    let passed = step
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TurnPassed { .. }));
    if after.active_seat() != before.active_seat() {
        prop_assert!(passed);
        prop_assert_eq!(after.active_seat(), before.next_seat());
        prop_assert_eq!(after.turn_number(), before.turn_number() + 1);
    } else {
        prop_assert!(!passed);
    }

    // A played 6 always keeps the turn.
    if let Some(moved) = &step.moved {
        if moved.dice.is_six() && !moved.victory {
            prop_assert_eq!(after.active_color(), before.active_color());
        }
    }

    // Exactly the winner has all four tokens home.
    let winners: Vec<Color> = after
        .players()
        .filter(|p| p.outcome() == Outcome::Won)
        .map(|p| p.color)
        .collect();
    match after.winner() {
        Some(color) => {
            prop_assert_eq!(winners, vec![color]);
            prop_assert!(after.player(color).unwrap().all_finished());
            prop_assert_eq!(after.phase(), Phase::GameOver);
            prop_assert!(step.intent.is_none());
        }
        None => {
            prop_assert!(winners.is_empty());
            prop_assert!(after.players().all(|p| !p.all_finished()));
        }
    }

    Ok(())
}

/// Play until someone wins, checking invariants after every step.
fn play_out(
    colors: &[Color],
    rules: RulesConfig,
    seed: u64,
    choices: &[u8],
) -> Result<GameState, TestCaseError> {
    let config = GameConfig::for_colors(colors).with_rules(rules);
    let mut engine = TurnEngine::seeded(config, seed).unwrap();
    let mut pick = choices.iter().copied().cycle();

    for _ in 0..MAX_STEPS {
        let before = engine.snapshot();
        let step = match engine.phase() {
            Phase::GameOver => return Ok(before),
            Phase::AwaitingRoll => engine.roll_dice(),
            Phase::AwaitingPass => engine.settle(),
            Phase::AwaitingSelection => {
                let choice = pick.next().unwrap_or(0);
                let legal = engine.legal_tokens();
                if engine.pending_intent().is_some() && choice % 2 == 0 {
                    engine.settle()
                } else {
                    let slot = legal[choice as usize % legal.len()];
                    engine.select_token(slot as usize)
                }
            }
        };
        let step = step.map_err(|err| TestCaseError::fail(err.to_string()))?;
        check_step(&before, engine.state(), &step)?;
    }

    Err(TestCaseError::fail("game did not finish"))
}

fn table() -> impl Strategy<Value = Vec<Color>> {
    (2usize..=4).prop_flat_map(|n| Just(Color::ALL[..n].to_vec()).prop_shuffle())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_random_games_keep_invariants(
        colors in table(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let end = play_out(&colors, RulesConfig::default(), seed, &choices)?;
        prop_assert!(end.winner().is_some());
    }

    #[test]
    fn prop_blocking_games_keep_invariants(
        colors in table(),
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let rules = RulesConfig::default().with_stacking(StackingRule::NoOwnStacking);
        let end = play_out(&colors, rules, seed, &choices)?;

        let board = BoardTopology::global();
        for player in end.players() {
            let mut seen = Vec::new();
            for (_, pos) in player.tokens() {
                if let Some(cell) = board.absolute_cell(player.color, pos) {
                    prop_assert!(!seen.contains(&cell));
                    seen.push(cell);
                }
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(seed in any::<u64>()) {
        let colors = [Color::Red, Color::Yellow];
        let a = play_out(&colors, RulesConfig::default(), seed, &[1])?;
        let b = play_out(&colors, RulesConfig::default(), seed, &[1])?;
        prop_assert_eq!(a, b);
    }
}
