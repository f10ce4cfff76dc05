use std::collections::BTreeSet;

use crate::{Board, Coord, Side, Tile, TileModifier};

/// The board as it would look with one more tile on it.
///
/// The tile may already be on the board, in which case it takes the place of
/// the board's copy.
pub(super) struct Overlay<'a> {
    board: &'a Board,
    pos: Coord,
    tile: &'a Tile,
}

/// The sides that make up one road or city.
pub(super) struct TracedStructure {
    pub sides: BTreeSet<(Coord, Side)>,
    /// No side of the structure faces an empty cell.
    pub complete: bool,
}

impl TracedStructure {
    pub fn sides_at(&self, pos: Coord) -> BTreeSet<Side> {
        self.sides
            .iter()
            .filter(|&&(p, _)| p == pos)
            .map(|&(_, side)| side)
            .collect()
    }
}

impl<'a> Overlay<'a> {
    pub fn new(board: &'a Board, pos: Coord, tile: &'a Tile) -> Self {
        Self { board, pos, tile }
    }

    pub fn get(&self, pos: Coord) -> Option<&'a Tile> {
        if pos == self.pos {
            Some(self.tile)
        } else {
            self.board.get(pos)
        }
    }

    /// Follows the structure on `start` of the overlaid tile across tile borders.
    pub fn trace(&self, start: Side) -> TracedStructure {
        let mut sides = BTreeSet::new();
        let mut complete = true;
        let mut stack = vec![(self.pos, start)];

        while let Some((pos, entry)) = stack.pop() {
            let Some(tile) = self.get(pos) else {
                continue;
            };
            for side in tile.connected_sides(entry) {
                if !sides.insert((pos, side)) {
                    continue;
                }
                let next = pos
                    .step(side)
                    .and_then(|next_pos| Some((next_pos, self.get(next_pos)?)));
                match next {
                    Some((next_pos, next_tile))
                        if tile
                            .edge(side)
                            .is_compatible(next_tile.edge(side.opposite())) =>
                    {
                        stack.push((next_pos, side.opposite()));
                    }
                    Some(_) => {}
                    None => complete = false,
                }
            }
        }
        TracedStructure { sides, complete }
    }

    /// Is the overlaid tile a monastery with all 8 cells around it taken?
    pub fn monastery_complete(&self) -> bool {
        if !self.tile.has_modifier(TileModifier::Monastery) {
            return false;
        }
        let surrounding: Vec<Coord> = self.pos.surrounding().collect();
        surrounding.len() == 8 && surrounding.iter().all(|&pos| self.get(pos).is_some())
    }
}
