//! Capture resolution.
//!
//! A token arriving on a shared-track cell that is not safe sends every
//! token of every other color on that cell back to base. Own tokens are
//! never captured, and off-track or safe destinations capture nothing.

use smallvec::SmallVec;

use crate::board::{AbsoluteCell, BoardTopology};
use crate::core::{GameState, Position, TokenId};

/// Opponent tokens that `mover` would capture by arriving at `destination`,
/// together with the contested cell.
///
/// Returns `None` when the destination is off the track or safe.
#[must_use]
pub fn captures_for(
    state: &GameState,
    board: &BoardTopology,
    mover: TokenId,
    destination: Position,
) -> Option<(AbsoluteCell, SmallVec<[TokenId; 4]>)> {
    let cell = board.absolute_cell(mover.color, destination)?;
    if board.is_safe_cell(cell) {
        return None;
    }

    let victims: SmallVec<[TokenId; 4]> = state
        .occupants(board, cell)
        .into_iter()
        .filter(|token| token.color != mover.color)
        .collect();

    Some((cell, victims))
}

/// Check if moving `mover` to `destination` captures anything.
#[must_use]
pub fn would_capture(
    state: &GameState,
    board: &BoardTopology,
    mover: TokenId,
    destination: Position,
) -> bool {
    captures_for(state, board, mover, destination).is_some_and(|(_, victims)| !victims.is_empty())
}

/// Send the given tokens back to base.
pub(crate) fn send_to_base(state: &mut GameState, victims: &[TokenId]) {
    for victim in victims {
        let seat = state
            .seat_of(victim.color)
            .expect("captured token belongs to a seated color");
        state.players[seat].tokens[victim.slot()] = Position::BASE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, PlayerConfig};

    fn table(colors: &[Color]) -> GameState {
        let configs: Vec<_> = colors.iter().map(|&c| PlayerConfig::new(c, "")).collect();
        GameState::new(&configs).unwrap()
    }

    #[test]
    fn test_capture_on_shared_cell() {
        let board = BoardTopology::global();
        // Blue 5 is absolute 44, Red reaches 44 at logical 44.
        let blue = TokenId::new(Color::Blue, 0);
        let state = table(&[Color::Red, Color::Blue]).with_token_at(blue, Position::new(5));
        let red = TokenId::new(Color::Red, 0);

        let (cell, victims) = captures_for(&state, board, red, Position::new(44)).unwrap();
        assert_eq!(cell, AbsoluteCell::new(44));
        assert_eq!(victims.as_slice(), &[blue]);
        assert!(would_capture(&state, board, red, Position::new(44)));
    }

    #[test]
    fn test_stacked_opponents_all_captured() {
        let board = BoardTopology::global();
        let state = table(&[Color::Red, Color::Green, Color::Blue])
            .with_token_at(TokenId::new(Color::Green, 0), Position::new(7)) // abs 20
            .with_token_at(TokenId::new(Color::Green, 1), Position::new(7))
            .with_token_at(TokenId::new(Color::Blue, 2), Position::new(33)); // abs 20

        let (_, victims) =
            captures_for(&state, board, TokenId::new(Color::Red, 0), Position::new(20)).unwrap();
        assert_eq!(victims.len(), 3);
    }

    #[test]
    fn test_own_tokens_not_captured() {
        let board = BoardTopology::global();
        let state = table(&[Color::Red, Color::Blue])
            .with_token_at(TokenId::new(Color::Red, 1), Position::new(10));

        assert!(!would_capture(&state, board, TokenId::new(Color::Red, 0), Position::new(10)));
    }

    #[test]
    fn test_safe_cell_never_captures() {
        let board = BoardTopology::global();
        // Green entry (abs 13) is Red logical 13.
        let state = table(&[Color::Red, Color::Green])
            .with_token_at(TokenId::new(Color::Green, 0), Position::START);

        assert!(captures_for(&state, board, TokenId::new(Color::Red, 0), Position::new(13)).is_none());
    }

    #[test]
    fn test_home_stretch_never_captures() {
        let board = BoardTopology::global();
        let state = table(&[Color::Red, Color::Blue])
            .with_token_at(TokenId::new(Color::Blue, 0), Position::new(52));

        assert!(captures_for(&state, board, TokenId::new(Color::Red, 0), Position::new(52)).is_none());
    }

    #[test]
    fn test_send_to_base() {
        let blue = TokenId::new(Color::Blue, 3);
        let mut state = table(&[Color::Red, Color::Blue]).with_token_at(blue, Position::new(30));
        send_to_base(&mut state, &[blue]);
        assert_eq!(state.position(blue), Some(Position::BASE));
    }
}
