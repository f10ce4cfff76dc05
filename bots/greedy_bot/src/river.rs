use carcassonne::{Coord, Side, StructureKind, Tile, TilePlacement};
use carcassonne_bot_utils::GameView;
use tracing::debug;

use crate::candidates::{free_neighbour, SEARCH_ORDER};

/// Continues the river with the first river tile in hand that fits.
///
/// Placements whose river would run back towards existing tiles are turned
/// around once so the river leaves through another side. If that turned tile
/// doesn't fit, the spot is skipped. Returns `None` if no river tile can be
/// placed, e.g. because there are none in hand.
pub fn river_placement(view: &impl GameView) -> Option<TilePlacement> {
    for anchor in view.placed_tiles() {
        let Some(anchor_pos) = anchor.placed_pos else {
            continue;
        };
        for (hand_index, hand_tile) in view.hand().iter().enumerate() {
            if !hand_tile.has_river() {
                continue;
            }
            for side in SEARCH_ORDER {
                let Some(target) = free_neighbour(view, anchor_pos, side) else {
                    continue;
                };
                if let Some(tile) = fit_river(view, hand_tile, target, side.opposite()) {
                    debug!(pos = %target, %tile, "Continuing the river");
                    return Some(TilePlacement {
                        hand_index,
                        tile: tile.placed_at(target),
                        pos: target,
                    });
                }
            }
        }
    }
    None
}

/// `hand_tile` as it should be placed at `target` with its river flowing in
/// through `facing`, or `None` if that doesn't work out.
fn fit_river(view: &impl GameView, hand_tile: &Tile, target: Coord, facing: Side) -> Option<Tile> {
    if !view.can_place(hand_tile, target) || hand_tile.edge(facing) != StructureKind::River {
        return None;
    }
    let mut tile = hand_tile.clone();
    if u_turn_risk(view, &tile, target, facing) {
        tile.rotate_clockwise(1);
        if tile.edge(facing) != StructureKind::River {
            tile.rotate_clockwise(2);
        }
        if !view.can_place(&tile, target) {
            debug!(pos = %target, "River would turn back on itself");
            return None;
        }
    }
    Some(tile)
}

/// Would the river leaving `tile` at `target` run into existing tiles within
/// the next two cells?
fn u_turn_risk(view: &impl GameView, tile: &Tile, target: Coord, facing: Side) -> bool {
    Side::ALL
        .into_iter()
        .filter(|&exit| exit != facing && tile.edge(exit) == StructureKind::River)
        .any(|exit| {
            let (dx, dy) = exit.offset();
            let near = target.offset(dx, dy);
            let far = target.offset(2 * dx, 2 * dy);
            [near, far]
                .into_iter()
                .flatten()
                .any(|center| occupied_next_to(view, center, target))
        })
}

/// Is any orthogonal neighbour of `center`, other than `skip`, occupied?
fn occupied_next_to(view: &impl GameView, center: Coord, skip: Coord) -> bool {
    Side::ALL
        .into_iter()
        .filter_map(|side| center.step(side))
        .any(|pos| pos != skip && view.tile_at(pos).is_some())
}
