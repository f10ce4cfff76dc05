use std::collections::{BTreeMap, BTreeSet};

use carcassonne::{
    Board, CompletedStructure, Coord, GameSnapshot, InvalidBoard, Meeple, MeeplePlacement,
    PlayerId, Spot, StructureKind, Tile,
};

/// Read-only access to the game, as far as a bot needs it to pick a move.
///
/// Bots should only talk to the game through this trait, so they can be tested
/// against hand-made positions and don't depend on how the board is stored.
pub trait GameView {
    /// The player the bot is playing as.
    fn me(&self) -> PlayerId;
    fn num_players(&self) -> usize;
    /// The number of tiles that have not been drawn yet.
    fn tiles_remaining(&self) -> usize;
    fn hand(&self) -> &[Tile];

    fn tile_at(&self, pos: Coord) -> Option<&Tile>;
    /// All tiles on the board, in the order they were placed.
    fn placed_tiles(&self) -> Vec<&Tile>;
    fn meeples_placed_by(&self, player: PlayerId) -> Vec<MeeplePlacement>;

    /// Can `tile`, in its current rotation, be placed at `pos`?
    fn can_place(&self, tile: &Tile, pos: Coord) -> bool;
    /// The structures that `tile` would complete at its `placed_pos`.
    fn completed_structures(&self, tile: &Tile) -> Vec<CompletedStructure>;
    /// The spots of `tile` where a meeple could stand, and what it would claim.
    fn claimable_structures(&self, tile: &Tile) -> BTreeMap<Spot, StructureKind>;
    /// The meeples already on the structure that `spot` of `tile` belongs to.
    fn existing_claims(&self, tile: &Tile, spot: Spot) -> Vec<Meeple>;

    /// The spots of `tile` that belong to any structure it would complete.
    fn completed_spots(&self, tile: &Tile) -> BTreeSet<Spot> {
        self.completed_structures(tile)
            .into_iter()
            .flat_map(|structure| structure.spots)
            .collect()
    }
}

/// A [`GameView`] for the snapshot sent along with a request.
#[derive(Clone, Debug)]
pub struct SnapshotView {
    snapshot: GameSnapshot,
    board: Board,
}

impl SnapshotView {
    pub fn new(snapshot: GameSnapshot) -> Result<Self, InvalidBoard> {
        let board = snapshot.to_board()?;
        Ok(Self { snapshot, board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl GameView for SnapshotView {
    fn me(&self) -> PlayerId {
        self.snapshot.me
    }

    fn num_players(&self) -> usize {
        self.snapshot.num_players
    }

    fn tiles_remaining(&self) -> usize {
        self.snapshot.tiles_remaining
    }

    fn hand(&self) -> &[Tile] {
        &self.snapshot.hand
    }

    fn tile_at(&self, pos: Coord) -> Option<&Tile> {
        self.board.get(pos)
    }

    fn placed_tiles(&self) -> Vec<&Tile> {
        self.board.placed_tiles().collect()
    }

    fn meeples_placed_by(&self, player: PlayerId) -> Vec<MeeplePlacement> {
        self.board.meeples_placed_by(player)
    }

    fn can_place(&self, tile: &Tile, pos: Coord) -> bool {
        self.board.can_place(tile, pos)
    }

    fn completed_structures(&self, tile: &Tile) -> Vec<CompletedStructure> {
        self.board.completed_structures(tile)
    }

    fn claimable_structures(&self, tile: &Tile) -> BTreeMap<Spot, StructureKind> {
        self.board.claimable_structures(tile)
    }

    fn existing_claims(&self, tile: &Tile, spot: Spot) -> Vec<Meeple> {
        self.board.existing_claims(tile, spot)
    }
}
