use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen};

use crate::{Coord, Edges, Side, StructureKind, Tile, TileModifier};

/// A small random board, plus a tile and a cell to try it on.
///
/// The board is not necessarily reachable by legal play, but every tile has a
/// unique position in a 7 x 7 area, and the cell is somewhere in that area.
#[derive(Clone, Debug)]
pub struct PlacementInput {
    pub board_tiles: Vec<Tile>,
    pub tile: Tile,
    pub pos: Coord,
}

impl Arbitrary for PlacementInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_tiles = usize::arbitrary(g) % 12 + 1;
        let mut tiles_by_pos = BTreeMap::new();
        for _ in 0..num_tiles {
            let pos = small_coord(g);
            tiles_by_pos.insert(pos, Tile::arbitrary(g).placed_at(pos));
        }
        PlacementInput {
            board_tiles: tiles_by_pos.into_values().collect(),
            tile: Tile::arbitrary(g),
            pos: small_coord(g),
        }
    }
}

fn small_coord(g: &mut Gen) -> Coord {
    Coord::new(20 + usize::arbitrary(g) % 7, 20 + usize::arbitrary(g) % 7)
}

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Side::ALL).unwrap()
    }
}

impl Arbitrary for StructureKind {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[
            StructureKind::Grass,
            StructureKind::Grass,
            StructureKind::Road,
            StructureKind::RoadStart,
            StructureKind::City,
            StructureKind::River,
        ])
        .unwrap()
    }
}

impl Arbitrary for Tile {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut tile = Tile::new(
            "random",
            Edges {
                top: StructureKind::arbitrary(g),
                right: StructureKind::arbitrary(g),
                bottom: StructureKind::arbitrary(g),
                left: StructureKind::arbitrary(g),
            },
        );
        if bool::arbitrary(g) {
            tile.modifiers.insert(TileModifier::Emblem);
        }
        if u8::arbitrary(g) % 4 == 0 {
            tile.modifiers.insert(TileModifier::Monastery);
        }
        tile.rotate_clockwise(u8::arbitrary(g));
        tile
    }
}
