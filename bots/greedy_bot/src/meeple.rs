use carcassonne::{MeepleMove, Spot, StructureKind, Tile};
use carcassonne_bot_utils::GameView;
use tracing::debug;

use crate::Config;

/// The structures worth a meeple, most valuable first.
const PRIORITY: [StructureKind; 3] = [
    StructureKind::Monastery,
    StructureKind::City,
    StructureKind::Road,
];

/// Decides where to put a meeple on the tile placed this turn, if anywhere.
///
/// Meeples are kept back once too many of them are in play for the tiles that
/// are left. Otherwise the first free structure in [`PRIORITY`] order is
/// claimed, skipping structures that this placement completes or that
/// somebody already claimed.
pub fn meeple_move(view: &impl GameView, config: &Config, last_tile: Option<&Tile>) -> MeepleMove {
    let Some(last_tile) = last_tile else {
        return MeepleMove::Pass;
    };
    let Some(pos) = last_tile.placed_pos else {
        return MeepleMove::Pass;
    };
    // The board has the meeples placed since our tile went down
    let tile = view.tile_at(pos).unwrap_or(last_tile);

    let in_play = view.meeples_placed_by(view.me()).len();
    if in_play >= config.max_meeples {
        debug!(in_play, "No meeples left");
        return MeepleMove::Pass;
    }
    let opponents = view.num_players().saturating_sub(1).max(1);
    if in_play >= view.tiles_remaining() / opponents + 1 {
        debug!(in_play, tiles_remaining = view.tiles_remaining(), "Keeping meeples in reserve");
        return MeepleMove::Pass;
    }

    let completed = view.completed_spots(tile);
    let claimable = view.claimable_structures(tile);
    for priority in PRIORITY {
        for (&spot, &kind) in &claimable {
            if kind != priority || completed.contains(&spot) || tile.claim(spot).is_some() {
                continue;
            }
            if view.existing_claims(tile, spot).is_empty() {
                debug!(%pos, ?spot, ?kind, "Claiming");
                return MeepleMove::Place { pos, spot };
            }
        }
    }
    MeepleMove::Pass
}
