//! Destinations and move legality.
//!
//! ## Rules
//!
//! - A token in base moves only on a 6, onto its entry square
//! - A finished token never moves
//! - Any other token moves `roll` squares, crossing from the track into the
//!   home stretch as needed, and may not overshoot the finish
//! - With `StackingRule::NoOwnStacking`, a move may not end on a track cell
//!   already holding one of the mover's own tokens

use smallvec::SmallVec;

use crate::core::{DiceValue, Player, Position, RulesConfig, StackingRule, TOKENS_PER_PLAYER};

/// Where a token at `position` lands with `roll`, ignoring other tokens.
///
/// Returns `None` if the token cannot move with this roll.
#[must_use]
pub fn destination(position: Position, roll: DiceValue) -> Option<Position> {
    if position.is_base() {
        roll.is_six().then_some(Position::START)
    } else {
        position.advanced_by(roll.get())
    }
}

/// Check whether the token in `slot` may move with `roll`.
#[must_use]
pub fn is_legal(player: &Player, slot: usize, roll: DiceValue, rules: &RulesConfig) -> bool {
    let Some(to) = destination(player.token(slot), roll) else {
        return false;
    };

    match rules.stacking {
        StackingRule::Unlimited => true,
        StackingRule::NoOwnStacking => {
            !to.is_on_track()
                || !player
                    .positions()
                    .iter()
                    .enumerate()
                    .any(|(other, &pos)| other != slot && pos == to)
        }
    }
}

/// Token slots of `player` that may move with `roll`, in slot order.
#[must_use]
pub fn legal_tokens(player: &Player, roll: DiceValue, rules: &RulesConfig) -> SmallVec<[u8; 4]> {
    (0..TOKENS_PER_PLAYER)
        .filter(|&slot| is_legal(player, slot, roll, rules))
        .map(|slot| slot as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn dice(v: u8) -> DiceValue {
        DiceValue::new(v).unwrap()
    }

    fn player_at(positions: [i8; 4]) -> Player {
        let mut player = Player::new(Color::Red, "p");
        player.tokens = positions.map(Position::new);
        player
    }

    #[test]
    fn test_base_needs_six() {
        assert_eq!(destination(Position::BASE, dice(6)), Some(Position::START));
        for v in 1..=5 {
            assert_eq!(destination(Position::BASE, dice(v)), None);
        }
    }

    #[test]
    fn test_finished_never_moves() {
        for v in 1..=6 {
            assert_eq!(destination(Position::FINISHED, dice(v)), None);
        }
    }

    #[test]
    fn test_track_overflow_into_home_stretch() {
        // 48 + 5 overflows the 51 track squares by 2.
        let to = destination(Position::new(48), dice(5)).unwrap();
        assert_eq!(to, Position::new(Position::HOME_ENTRY.raw() + 2));
        assert!(to.is_in_home_stretch());
    }

    #[test]
    fn test_exact_finish_required() {
        assert_eq!(destination(Position::new(50), dice(6)), Some(Position::FINISHED));
        assert_eq!(destination(Position::new(53), dice(3)), Some(Position::FINISHED));
        assert_eq!(destination(Position::new(53), dice(4)), None);
        assert_eq!(destination(Position::new(55), dice(2)), None);
    }

    #[test]
    fn test_legal_tokens_all_in_base() {
        let player = player_at([-1, -1, -1, -1]);
        let rules = RulesConfig::default();

        assert!(legal_tokens(&player, dice(3), &rules).is_empty());
        assert_eq!(legal_tokens(&player, dice(6), &rules).as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_legal_tokens_mixed() {
        let player = player_at([-1, 10, 54, 56]);
        let rules = RulesConfig::default();

        assert_eq!(legal_tokens(&player, dice(2), &rules).as_slice(), &[1, 2]);
        assert_eq!(legal_tokens(&player, dice(3), &rules).as_slice(), &[1]);
        assert_eq!(legal_tokens(&player, dice(6), &rules).as_slice(), &[0, 1]);
    }

    #[test]
    fn test_unlimited_stacking_allows_entry_on_own_token() {
        let player = player_at([0, -1, -1, -1]);
        let rules = RulesConfig::default();
        assert!(is_legal(&player, 1, dice(6), &rules));
    }

    #[test]
    fn test_no_own_stacking_blocks() {
        let player = player_at([0, -1, 4, 52]);
        let rules = RulesConfig::default().with_stacking(StackingRule::NoOwnStacking);

        // Entry square occupied by slot 0.
        assert!(!is_legal(&player, 1, dice(6), &rules));
        // 0 + 4 lands on slot 2.
        assert!(!is_legal(&player, 0, dice(4), &rules));
        assert!(is_legal(&player, 0, dice(5), &rules));
    }

    #[test]
    fn test_no_own_stacking_ignores_home_stretch() {
        let player = player_at([50, 52, -1, -1]);
        let rules = RulesConfig::default().with_stacking(StackingRule::NoOwnStacking);
        assert!(is_legal(&player, 0, dice(2), &rules));
    }
}
