use crate::Coord;

/// The error type for [`Board::new()`](crate::Board::new), i.e. for a board
/// snapshot that can't be right.
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidBoard {
    MissingPosition { tile_idx: usize },
    OutOfBounds { tile_idx: usize, pos: Coord },
    DuplicatePosition { tile_idx: usize, pos: Coord },
}

impl std::error::Error for InvalidBoard {}

impl std::fmt::Display for InvalidBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBoard::MissingPosition { tile_idx } => {
                write!(f, "Board tile #{} has no position", tile_idx)
            }
            InvalidBoard::OutOfBounds { tile_idx, pos } => {
                write!(f, "Board tile #{} is placed outside the map at {}", tile_idx, pos)
            }
            InvalidBoard::DuplicatePosition { tile_idx, pos } => write!(
                f,
                "Board tile #{} is placed at {}, where there already is a tile",
                tile_idx, pos
            ),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Tile`](crate::Tile).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFromStrErr {
    WrongNumberOfEdges,
    InvalidEdge(char),
    InvalidModifier(char),
}

impl std::error::Error for TileFromStrErr {}

impl std::fmt::Display for TileFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileFromStrErr::WrongNumberOfEdges => write!(f, "A tile needs exactly four edges"),
            TileFromStrErr::InvalidEdge(c) => write!(f, "'{}' is not an edge kind", c),
            TileFromStrErr::InvalidModifier(c) => write!(f, "'{}' is not a tile modifier", c),
        }
    }
}

/// Returned by a bot when none of its tiles fits anywhere on the board.
///
/// The rules are supposed to make this impossible, so it is reported to the
/// engine explicitly instead of sending some made-up move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoLegalPlacement {
    pub hand_size: usize,
    pub placed_tiles: usize,
}

impl std::error::Error for NoLegalPlacement {}

impl std::fmt::Display for NoLegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "None of the {} tiles in hand can be placed next to any of the {} tiles on the board",
            self.hand_size, self.placed_tiles
        )
    }
}
