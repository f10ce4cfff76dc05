//! Helpers for setting up positions in tests.

use carcassonne::{Coord, GameSnapshot, Meeple, PlayerId, Tile};
use carcassonne_bot_utils::SnapshotView;

pub const ME: PlayerId = PlayerId(1);
pub const OPPONENT: PlayerId = PlayerId(2);

/// A tile in compact notation, placed at `(x, y)`.
pub fn at(code: &str, x: usize, y: usize) -> Tile {
    code.parse::<Tile>()
        .expect("Invalid tile code")
        .placed_at(Coord::new(x, y))
}

pub fn meeple(player: PlayerId, id: u8) -> Meeple {
    Meeple { player, id }
}

/// A two-player game seen by [`ME`], with plenty of tiles left.
pub fn view(hand: &[&str], board: Vec<Tile>) -> SnapshotView {
    view_with(hand, board, 2, 50)
}

pub fn view_with(
    hand: &[&str],
    board: Vec<Tile>,
    num_players: usize,
    tiles_remaining: usize,
) -> SnapshotView {
    SnapshotView::new(GameSnapshot {
        me: ME,
        num_players,
        tiles_remaining,
        hand: hand
            .iter()
            .map(|code| code.parse().expect("Invalid tile code"))
            .collect(),
        board,
    })
    .expect("Invalid board")
}
