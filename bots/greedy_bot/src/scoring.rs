use carcassonne::{Coord, Side, Spot, Tile, TileModifier};
use carcassonne_bot_utils::GameView;

use crate::Config;

/// How much we'd like to place `tile`, in its current rotation, at `pos`.
///
/// `bonus` is added on top of the score. Scores of different placements on
/// the same board can be compared directly, higher is better.
pub fn score_placement(
    view: &impl GameView,
    config: &Config,
    tile: &Tile,
    pos: Coord,
    bonus: i32,
) -> i32 {
    let me = view.me();
    let mut score = bonus;

    // Monasteries are scored by the tiles around them
    for neighbour in pos.surrounding().filter_map(|p| view.tile_at(p)) {
        if neighbour.has_modifier(TileModifier::Monastery) {
            let ours = neighbour
                .claim(Spot::Monastery)
                .is_some_and(|meeple| meeple.player == me);
            score += if ours {
                config.own_monastery
            } else {
                config.other_monastery
            };
        }
    }

    for side in Side::ALL {
        let Some(neighbour) = pos.step(side).and_then(|p| view.tile_at(p)) else {
            continue;
        };
        let facing_claim = neighbour.claim(Spot::from(side.opposite()));
        if facing_claim.is_some_and(|meeple| meeple.player == me) {
            score += config.own_claim_neighbour;
        }
    }

    let completed = view.completed_structures(&tile.placed_at(pos)).len();
    score += config.completed_structure * completed as i32;

    if tile.has_modifier(TileModifier::Emblem) {
        score += config.emblem;
    }
    score
}
