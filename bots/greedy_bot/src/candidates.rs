use carcassonne::{Coord, Side, Tile, TilePlacement};
use carcassonne_bot_utils::GameView;
use tracing::debug;

use crate::scoring::score_placement;
use crate::Config;

/// The order in which the four neighbours of a tile are visited.
pub const SEARCH_ORDER: [Side; 4] = [Side::Right, Side::Bottom, Side::Left, Side::Top];

/// A scored way of placing one of the tiles in hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub hand_index: usize,
    /// A rotated copy of the hand tile.
    pub tile: Tile,
    pub pos: Coord,
    pub score: i32,
}

impl Candidate {
    /// Turns the hand tile until it matches the candidate, and places it.
    pub fn into_placement(self, hand: &[Tile]) -> TilePlacement {
        let mut tile = hand[self.hand_index].clone();
        while tile.rotation() != self.tile.rotation() {
            tile.rotate_clockwise(1);
        }
        tile.placed_pos = Some(self.pos);
        TilePlacement {
            hand_index: self.hand_index,
            tile,
            pos: self.pos,
        }
    }
}

/// Finds the best place for any of the tiles in hand, or `None` if no tile
/// fits anywhere.
///
/// Placements next to one of our meeples that continue its structure are
/// tried first. Only if there are none, every free cell next to a tile is
/// considered. On equal scores, the candidate found first wins.
pub fn best_candidate(view: &impl GameView, config: &Config) -> Option<Candidate> {
    if let Some(candidate) = best_extension(view, config) {
        debug!(pos = %candidate.pos, score = candidate.score, "Extending own structure");
        return Some(candidate);
    }
    let candidate = best_anywhere(view, config)?;
    debug!(pos = %candidate.pos, score = candidate.score, "Placing anywhere");
    Some(candidate)
}

/// The best placement that continues an edge of a tile with one of our meeples on it.
fn best_extension(view: &impl GameView, config: &Config) -> Option<Candidate> {
    let mut anchors: Vec<(Coord, &Tile)> = view
        .placed_tiles()
        .into_iter()
        .filter_map(|tile| Some((tile.placed_pos?, tile)))
        .collect();
    anchors.sort_by_key(|&(pos, _)| pos);

    let mut best = None;
    for placement in view.meeples_placed_by(view.me()) {
        for &(anchor_pos, anchor) in &anchors {
            for _ in anchor.claims.values().filter(|&&m| m == placement.meeple) {
                for side in SEARCH_ORDER {
                    let Some(target) = free_neighbour(view, anchor_pos, side) else {
                        continue;
                    };
                    for (hand_index, tile) in legal_rotations(view, target) {
                        if !tile
                            .edge(side.opposite())
                            .is_compatible(anchor.edge(side))
                        {
                            continue;
                        }
                        let score =
                            score_placement(view, config, &tile, target, config.extension_bonus);
                        keep_best(
                            &mut best,
                            Candidate {
                                hand_index,
                                tile,
                                pos: target,
                                score,
                            },
                        );
                    }
                }
            }
        }
    }
    best
}

/// The best placement next to any tile on the board.
fn best_anywhere(view: &impl GameView, config: &Config) -> Option<Candidate> {
    let mut best = None;
    for anchor in view.placed_tiles() {
        let Some(anchor_pos) = anchor.placed_pos else {
            continue;
        };
        for side in SEARCH_ORDER {
            let Some(target) = free_neighbour(view, anchor_pos, side) else {
                continue;
            };
            for (hand_index, tile) in legal_rotations(view, target) {
                let score = score_placement(view, config, &tile, target, 0);
                keep_best(
                    &mut best,
                    Candidate {
                        hand_index,
                        tile,
                        pos: target,
                        score,
                    },
                );
            }
        }
    }
    best
}

/// The empty cell across `side` of `pos`, if it is on the map.
pub(crate) fn free_neighbour(view: &impl GameView, pos: Coord, side: Side) -> Option<Coord> {
    pos.step(side).filter(|&p| view.tile_at(p).is_none())
}

/// Every tile in hand in every rotation that may be placed at `pos`, in hand
/// order and then by rotation.
fn legal_rotations<'a>(
    view: &'a impl GameView,
    pos: Coord,
) -> impl Iterator<Item = (usize, Tile)> + 'a {
    view.hand()
        .iter()
        .enumerate()
        .flat_map(|(hand_index, tile)| (0..4).map(move |steps| (hand_index, tile.rotated(steps))))
        .filter(move |(_, tile)| view.can_place(tile, pos))
}

fn keep_best(best: &mut Option<Candidate>, candidate: Candidate) {
    if best
        .as_ref()
        .map_or(true, |best| candidate.score > best.score)
    {
        *best = Some(candidate);
    }
}
