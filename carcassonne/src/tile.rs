use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TileFromStrErr;

/// The width and height of the map.
///
/// Valid coordinates are in `0..MAX_MAP_LENGTH` on both axes.
pub const MAX_MAP_LENGTH: usize = 170;

/// Identifies a player in a game.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

/// One of the four sides of a tile, named in clockwise order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The `(dx, dy)` step from a cell to the neighbouring cell across this side.
    ///
    /// The y axis grows downwards, so the cell above has `dy == -1`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }

    /// The side that this side turns into after a quarter turn clockwise.
    pub fn rotated_clockwise(self) -> Side {
        match self {
            Side::Top => Side::Right,
            Side::Right => Side::Bottom,
            Side::Bottom => Side::Left,
            Side::Left => Side::Top,
        }
    }
}

/// A place on a tile where a meeple can stand.
///
/// The ordering of the variants is the order in which a tile's spots are visited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spot {
    Top,
    Right,
    Bottom,
    Left,
    Monastery,
}

impl Spot {
    pub const ALL: [Spot; 5] = [
        Spot::Top,
        Spot::Right,
        Spot::Bottom,
        Spot::Left,
        Spot::Monastery,
    ];

    /// The side this spot sits on, or `None` for the monastery in the middle.
    pub fn side(self) -> Option<Side> {
        match self {
            Spot::Top => Some(Side::Top),
            Spot::Right => Some(Side::Right),
            Spot::Bottom => Some(Side::Bottom),
            Spot::Left => Some(Side::Left),
            Spot::Monastery => None,
        }
    }
}

impl From<Side> for Spot {
    fn from(side: Side) -> Spot {
        match side {
            Side::Top => Spot::Top,
            Side::Right => Spot::Right,
            Side::Bottom => Spot::Bottom,
            Side::Left => Spot::Left,
        }
    }
}

/// What runs across the edge of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Grass,
    Road,
    /// A road that ends at a junction, town or monastery inside the tile.
    RoadStart,
    City,
    River,
    Monastery,
}

impl StructureKind {
    /// Whether an edge of this kind may lie against an edge of the other kind.
    pub fn is_compatible(self, other: StructureKind) -> bool {
        use StructureKind::*;
        match (self, other) {
            (Road | RoadStart, Road | RoadStart) => true,
            _ => self == other,
        }
    }

    /// The structure a meeple standing on an edge of this kind would claim.
    ///
    /// Road starts are claimed as plain roads. Grass and rivers can't be claimed.
    pub fn claimed_as(self) -> Option<StructureKind> {
        match self {
            StructureKind::Road | StructureKind::RoadStart => Some(StructureKind::Road),
            StructureKind::City => Some(StructureKind::City),
            _ => None,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            StructureKind::Grass => 'G',
            StructureKind::Road => 'R',
            StructureKind::RoadStart => 'S',
            StructureKind::City => 'C',
            StructureKind::River => '~',
            StructureKind::Monastery => 'M',
        }
    }
}

/// Extra features printed on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileModifier {
    /// A pennant in a city, worth extra points.
    Emblem,
    Monastery,
}

/// A worker owned by a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Meeple {
    pub player: PlayerId,
    /// Distinguishes the meeples of one player.
    pub id: u8,
}

/// Where a meeple currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeeplePlacement {
    pub meeple: Meeple,
    pub pos: Coord,
    pub spot: Spot,
}

/// A cell on the map.
///
/// Coordinates are ordered row-major, i.e. by `y` first, then `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { y, x }
    }

    pub fn is_in_bounds(self) -> bool {
        self.x < MAX_MAP_LENGTH && self.y < MAX_MAP_LENGTH
    }

    /// The cell `(dx, dy)` away from this one, if it is on the map.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coord> {
        let coord = Coord {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        };
        coord.is_in_bounds().then_some(coord)
    }

    /// The orthogonal neighbour across the given side, if it is on the map.
    pub fn step(self, side: Side) -> Option<Coord> {
        let (dx, dy) = side.offset();
        self.offset(dx, dy)
    }

    /// The up to 8 cells around this one, including diagonals.
    pub fn surrounding(self) -> impl Iterator<Item = Coord> {
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The structure kinds on the four sides of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edges {
    pub top: StructureKind,
    pub right: StructureKind,
    pub bottom: StructureKind,
    pub left: StructureKind,
}

impl Edges {
    #[must_use]
    fn rotated_clockwise(self) -> Self {
        Self {
            top: self.left,
            right: self.top,
            bottom: self.right,
            left: self.bottom,
        }
    }
}

impl Index<Side> for Edges {
    type Output = StructureKind;

    fn index(&self, side: Side) -> &StructureKind {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }
}

/// A square tile, either in a player's hand or placed on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// The printed tile design this tile is a copy of.
    pub tile_type: String,
    pub edges: Edges,
    #[serde(default)]
    pub modifiers: BTreeSet<TileModifier>,
    /// The meeples standing on this tile.
    #[serde(default)]
    pub claims: BTreeMap<Spot, Meeple>,
    /// The number of quarter turns clockwise from the printed orientation, in `0..4`.
    #[serde(default)]
    rotation: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_pos: Option<Coord>,
}

impl Tile {
    pub fn new(tile_type: impl Into<String>, edges: Edges) -> Self {
        Self {
            tile_type: tile_type.into(),
            edges,
            modifiers: BTreeSet::new(),
            claims: BTreeMap::new(),
            rotation: 0,
            placed_pos: None,
        }
    }

    pub fn edge(&self, side: Side) -> StructureKind {
        self.edges[side]
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Turns the tile by `steps` quarter turns clockwise.
    ///
    /// Every edge (and any meeple standing on it) moves one side further in
    /// the order top → right → bottom → left → top per step.
    pub fn rotate_clockwise(&mut self, steps: u8) {
        for _ in 0..steps % 4 {
            self.edges = self.edges.rotated_clockwise();
            self.claims = std::mem::take(&mut self.claims)
                .into_iter()
                .map(|(spot, meeple)| match spot.side() {
                    Some(side) => (Spot::from(side.rotated_clockwise()), meeple),
                    None => (spot, meeple),
                })
                .collect();
            self.rotation = (self.rotation + 1) % 4;
        }
    }

    /// A copy of this tile, turned by `steps` quarter turns clockwise.
    #[must_use]
    pub fn rotated(&self, steps: u8) -> Tile {
        let mut tile = self.clone();
        tile.rotate_clockwise(steps);
        tile
    }

    /// A copy of this tile, placed at `pos`.
    #[must_use]
    pub fn placed_at(&self, pos: Coord) -> Tile {
        Tile {
            placed_pos: Some(pos),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_claim(mut self, spot: Spot, meeple: Meeple) -> Tile {
        self.claims.insert(spot, meeple);
        self
    }

    pub fn has_modifier(&self, modifier: TileModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn has_river(&self) -> bool {
        Side::ALL
            .iter()
            .any(|&side| self.edge(side) == StructureKind::River)
    }

    pub fn claim(&self, spot: Spot) -> Option<Meeple> {
        self.claims.get(&spot).copied()
    }

    /// The sides of this tile that belong to the same structure as `side`.
    ///
    /// All city sides of a tile form one city and all road sides one road.
    /// A road start, grass or river side only connects to itself.
    pub fn connected_sides(&self, side: Side) -> Vec<Side> {
        let kind = self.edge(side);
        match kind {
            StructureKind::Road | StructureKind::City => Side::ALL
                .into_iter()
                .filter(|&other| self.edge(other) == kind)
                .collect(),
            _ => vec![side],
        }
    }
}

/// Writes the compact notation that [`FromStr`] reads, e.g. `CRRG+E`.
impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for side in Side::ALL {
            write!(f, "{}", self.edge(side).symbol())?;
        }
        if !self.modifiers.is_empty() {
            write!(f, "+")?;
            for modifier in &self.modifiers {
                match modifier {
                    TileModifier::Emblem => write!(f, "E")?,
                    TileModifier::Monastery => write!(f, "M")?,
                }
            }
        }
        Ok(())
    }
}

/// Parses the compact tile notation.
///
/// Four characters give the edges in the order top, right, bottom, left:
/// `G` grass, `R` road, `S` road start, `C` city and `~` river.
/// They can be followed by `+` and modifier letters: `E` emblem, `M` monastery.
/// The whole string becomes the tile type.
impl FromStr for Tile {
    type Err = TileFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (edge_chars, modifier_chars) = s.split_once('+').unwrap_or((s, ""));

        let mut kinds = Vec::with_capacity(4);
        for c in edge_chars.chars() {
            kinds.push(match c {
                'G' => StructureKind::Grass,
                'R' => StructureKind::Road,
                'S' => StructureKind::RoadStart,
                'C' => StructureKind::City,
                '~' => StructureKind::River,
                _ => return Err(TileFromStrErr::InvalidEdge(c)),
            });
        }
        let [top, right, bottom, left]: [StructureKind; 4] = kinds
            .try_into()
            .map_err(|_| TileFromStrErr::WrongNumberOfEdges)?;

        let mut tile = Tile::new(
            s,
            Edges {
                top,
                right,
                bottom,
                left,
            },
        );
        for c in modifier_chars.chars() {
            tile.modifiers.insert(match c {
                'E' => TileModifier::Emblem,
                'M' => TileModifier::Monastery,
                _ => return Err(TileFromStrErr::InvalidModifier(c)),
            });
        }
        Ok(tile)
    }
}

/// Shorthand for creating tiles from the compact notation.
///
/// This macro is just calling the [`FromStr`] instance of [`Tile`].
/// ```
/// # use carcassonne::{tile, Side, StructureKind, TileModifier};
/// let tile = tile!("CRRG+E");
/// assert_eq!(tile.edge(Side::Top), StructureKind::City);
/// assert_eq!(tile.edge(Side::Left), StructureKind::Grass);
/// assert!(tile.has_modifier(TileModifier::Emblem));
/// ```
#[macro_export]
macro_rules! tile {
    ($s:literal) => {
        <$crate::Tile as std::str::FromStr>::from_str($s)
            .expect("Invalid tile code given to tile! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use tile;
