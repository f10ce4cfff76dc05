mod bbox;
mod structure;

use std::collections::{BTreeMap, BTreeSet};

pub use bbox::*;
use structure::Overlay;

use crate::{
    Coord, InvalidBoard, Meeple, MeeplePlacement, PlayerId, Side, Spot, StructureKind, Tile,
    TileModifier,
};

/// The tiles placed on the map so far.
///
/// This is rebuilt from every snapshot the engine sends, and answers the rule
/// questions a bot needs: where a tile fits, what a placement would complete,
/// and who already sits on a structure.
#[derive(Clone, Debug, Default)]
pub struct Board {
    /// Row-major index of the placed tiles.
    tiles: BTreeMap<Coord, Tile>,
    /// The positions in the order the tiles were placed.
    order: Vec<Coord>,
}

/// A structure that a placement finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedStructure {
    pub kind: StructureKind,
    /// The spots of the placed tile that belong to this structure.
    pub spots: BTreeSet<Spot>,
}

impl Board {
    /// Creates a board from the placed tiles, in the order they were placed.
    ///
    /// Every tile needs a position on the map, and no two tiles may share one.
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Result<Self, InvalidBoard> {
        let mut board = Self::default();
        for (tile_idx, tile) in tiles.into_iter().enumerate() {
            let pos = tile
                .placed_pos
                .ok_or(InvalidBoard::MissingPosition { tile_idx })?;
            if !pos.is_in_bounds() {
                return Err(InvalidBoard::OutOfBounds { tile_idx, pos });
            }
            if board.tiles.insert(pos, tile).is_some() {
                return Err(InvalidBoard::DuplicatePosition { tile_idx, pos });
            }
            board.order.push(pos);
        }
        Ok(board)
    }

    pub fn get(&self, pos: Coord) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub fn is_occupied(&self, pos: Coord) -> bool {
        self.tiles.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles with their positions, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.tiles.iter().map(|(&pos, tile)| (pos, tile))
    }

    /// All tiles in the order they were placed.
    pub fn placed_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.order.iter().map(|pos| &self.tiles[pos])
    }

    /// The smallest area that contains all tiles, or `None` for an empty board.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates_iter(self.tiles.keys().copied())
    }

    /// Can `tile`, in its current rotation, be placed at `pos`?
    ///
    /// The cell must be empty and touch at least one tile, and every touching
    /// edge must match. A river tile must also continue a river that is
    /// already on the board.
    pub fn can_place(&self, tile: &Tile, pos: Coord) -> bool {
        if !pos.is_in_bounds() || self.is_occupied(pos) {
            return false;
        }
        let mut has_neighbour = false;
        let mut continues_river = false;
        for side in Side::ALL {
            let Some(neighbour) = pos.step(side).and_then(|p| self.get(p)) else {
                continue;
            };
            has_neighbour = true;
            let edge = tile.edge(side);
            if !edge.is_compatible(neighbour.edge(side.opposite())) {
                return false;
            }
            if edge == StructureKind::River {
                continues_river = true;
            }
        }
        has_neighbour && (continues_river || !tile.has_river())
    }

    /// The structures of `tile` that would be complete with the tile at its
    /// `placed_pos`. Each structure is listed once.
    ///
    /// The tile may already be on the board. A tile without a position
    /// completes nothing.
    pub fn completed_structures(&self, tile: &Tile) -> Vec<CompletedStructure> {
        let Some(pos) = tile.placed_pos else {
            return Vec::new();
        };
        let overlay = Overlay::new(self, pos, tile);

        let mut visited: BTreeSet<Side> = BTreeSet::new();
        let mut completed = Vec::new();
        for side in Side::ALL {
            let Some(kind) = tile.edge(side).claimed_as() else {
                continue;
            };
            if visited.contains(&side) {
                continue;
            }
            let traced = overlay.trace(side);
            let on_tile = traced.sides_at(pos);
            visited.extend(on_tile.iter().copied());
            if traced.complete {
                completed.push(CompletedStructure {
                    kind,
                    spots: on_tile.into_iter().map(Spot::from).collect(),
                });
            }
        }
        if overlay.monastery_complete() {
            completed.push(CompletedStructure {
                kind: StructureKind::Monastery,
                spots: BTreeSet::from([Spot::Monastery]),
            });
        }
        completed
    }

    /// The spots of `tile` where a meeple could stand, with the kind of
    /// structure it would claim there.
    ///
    /// This does not look at existing claims, see [`Self::existing_claims()`].
    pub fn claimable_structures(&self, tile: &Tile) -> BTreeMap<Spot, StructureKind> {
        Spot::ALL
            .into_iter()
            .filter_map(|spot| {
                let kind = match spot.side() {
                    Some(side) => tile.edge(side).claimed_as()?,
                    None => tile
                        .has_modifier(TileModifier::Monastery)
                        .then_some(StructureKind::Monastery)?,
                };
                Some((spot, kind))
            })
            .collect()
    }

    /// All meeples standing anywhere on the structure that `spot` of `tile`
    /// belongs to.
    pub fn existing_claims(&self, tile: &Tile, spot: Spot) -> Vec<Meeple> {
        let (Some(pos), Some(side)) = (tile.placed_pos, spot.side()) else {
            return tile.claim(spot).into_iter().collect();
        };
        let overlay = Overlay::new(self, pos, tile);
        overlay
            .trace(side)
            .sides
            .iter()
            .filter_map(|&(pos, side)| overlay.get(pos)?.claim(Spot::from(side)))
            .collect()
    }

    /// Where the meeples of `player` stand, in row-major order.
    pub fn meeples_placed_by(&self, player: PlayerId) -> Vec<MeeplePlacement> {
        self.iter()
            .flat_map(|(pos, tile)| {
                tile.claims
                    .iter()
                    .filter(move |(_, meeple)| meeple.player == player)
                    .map(move |(&spot, &meeple)| MeeplePlacement { meeple, pos, spot })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{arbitrary::PlacementInput, tile};

    fn board(tiles: &[(&str, usize, usize)]) -> Board {
        Board::new(
            tiles
                .iter()
                .map(|&(code, x, y)| code.parse::<Tile>().unwrap().placed_at(Coord::new(x, y))),
        )
        .unwrap()
    }

    fn meeple(player: u8) -> Meeple {
        Meeple {
            player: PlayerId(player),
            id: 0,
        }
    }

    quickcheck! {
        fn never_place_on_an_occupied_cell(input: PlacementInput) -> bool {
            let board = Board::new(input.board_tiles).unwrap();
            !board.is_occupied(input.pos) || !board.can_place(&input.tile, input.pos)
        }

        fn placed_tiles_need_a_neighbour(input: PlacementInput) -> bool {
            let board = Board::new(input.board_tiles).unwrap();
            let touches = Side::ALL
                .iter()
                .any(|&side| input.pos.step(side).is_some_and(|p| board.is_occupied(p)));
            touches || !board.can_place(&input.tile, input.pos)
        }
    }

    #[test]
    fn rejects_invalid_snapshots() {
        let placed = tile!("GGGG").placed_at(Coord::new(3, 3));
        assert_eq!(
            Board::new([placed.clone(), placed]).unwrap_err(),
            InvalidBoard::DuplicatePosition {
                tile_idx: 1,
                pos: Coord::new(3, 3)
            }
        );
        assert_eq!(
            Board::new([tile!("GGGG")]).unwrap_err(),
            InvalidBoard::MissingPosition { tile_idx: 0 }
        );
    }

    #[test]
    fn placement_order_is_kept() {
        let board = board(&[("CCCC", 5, 5), ("GGGG", 2, 2), ("RRRR", 9, 1)]);
        let order: Vec<_> = board.placed_tiles().map(|t| t.tile_type.as_str()).collect();
        assert_eq!(order, ["CCCC", "GGGG", "RRRR"]);
        let rows: Vec<_> = board.iter().map(|(pos, _)| pos).collect();
        assert_eq!(
            rows,
            [Coord::new(9, 1), Coord::new(2, 2), Coord::new(5, 5)]
        );
    }

    #[test]
    fn edges_must_match() {
        let board = board(&[("CRGR", 5, 5)]);
        // Left of the start tile, facing its road
        assert!(board.can_place(&tile!("GRGR"), Coord::new(4, 5)));
        assert!(!board.can_place(&tile!("GGGG"), Coord::new(4, 5)));
        // Road starts connect to roads
        assert!(board.can_place(&tile!("GSGG"), Coord::new(4, 5)));
        // Above, facing the city
        assert!(board.can_place(&tile!("GGCG"), Coord::new(5, 4)));
        // Not touching anything
        assert!(!board.can_place(&tile!("GRGR"), Coord::new(7, 5)));
        // Occupied
        assert!(!board.can_place(&tile!("CRGR"), Coord::new(5, 5)));
    }

    #[test]
    fn rivers_must_continue() {
        let board = board(&[("G~G~", 5, 5)]);
        assert!(board.can_place(&tile!("G~G~"), Coord::new(6, 5)));
        // Grass against grass is fine for normal tiles, but a river tile must
        // connect its river
        assert!(board.can_place(&tile!("GGGG"), Coord::new(5, 6)));
        assert!(!board.can_place(&tile!("~G~G"), Coord::new(5, 6)));
    }

    #[test]
    fn completing_a_road() {
        // The road through (4, 5) keeps going left into empty space
        let board = board(&[("GRGR", 4, 5), ("GGGS", 6, 5)]);
        let straight = tile!("GRGR").placed_at(Coord::new(5, 5));
        let completed = board.completed_structures(&straight);
        assert_eq!(completed.len(), 0, "the road is still open on the left");

        let board = board_with_road_ends();
        let completed = board.completed_structures(&straight);
        assert_eq!(
            completed,
            vec![CompletedStructure {
                kind: StructureKind::Road,
                spots: BTreeSet::from([Spot::Right, Spot::Left]),
            }]
        );
    }

    fn board_with_road_ends() -> Board {
        board(&[("GSGG", 4, 5), ("GGGS", 6, 5)])
    }

    #[test]
    fn completing_a_monastery() {
        let mut tiles: Vec<(&str, usize, usize)> = Vec::new();
        for y in 4..=6 {
            for x in 4..=6 {
                if (x, y) != (5, 5) && (x, y) != (6, 6) {
                    tiles.push(("GGGG", x, y));
                }
            }
        }
        let board = board(&tiles);
        let monastery = tile!("GGGG+M").placed_at(Coord::new(5, 5));
        assert!(board.completed_structures(&monastery).is_empty());

        tiles.push(("GGGG", 6, 6));
        let board = self::board(&tiles);
        let completed = board.completed_structures(&monastery);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].kind, StructureKind::Monastery);
    }

    #[test]
    fn claimable_structures_by_kind() {
        let board = Board::default();
        let spots = board.claimable_structures(&tile!("CSG~+M"));
        assert_eq!(
            spots,
            BTreeMap::from([
                (Spot::Top, StructureKind::City),
                (Spot::Right, StructureKind::Road),
                (Spot::Monastery, StructureKind::Monastery),
            ])
        );
    }

    #[test]
    fn claims_along_a_city() {
        // A city running from (5, 4) down through (5, 5) into the new tile at (5, 6)
        let board = Board::new([
            tile!("GGCG").placed_at(Coord::new(5, 4)).with_claim(Spot::Bottom, meeple(2)),
            tile!("CGCG").placed_at(Coord::new(5, 5)),
        ])
        .unwrap();
        let new_tile = tile!("CRGR").placed_at(Coord::new(5, 6));
        assert_eq!(board.existing_claims(&new_tile, Spot::Top), vec![meeple(2)]);
        assert!(board.existing_claims(&new_tile, Spot::Left).is_empty());
        assert!(board
            .existing_claims(&new_tile, Spot::Monastery)
            .is_empty());
    }

    #[test]
    fn meeples_by_player() {
        let board = Board::new([
            tile!("GGGG+M").placed_at(Coord::new(5, 5)).with_claim(Spot::Monastery, meeple(1)),
            tile!("RGRG").placed_at(Coord::new(5, 4)).with_claim(Spot::Top, meeple(2)),
        ])
        .unwrap();
        let placements = board.meeples_placed_by(PlayerId(1));
        assert_eq!(
            placements,
            vec![MeeplePlacement {
                meeple: meeple(1),
                pos: Coord::new(5, 5),
                spot: Spot::Monastery
            }]
        );
    }
}
