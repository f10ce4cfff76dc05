use serde::{Deserialize, Serialize};

use crate::{Board, Coord, InvalidBoard, PlayerId, Spot, Tile};

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        player: PlayerId,
        num_players: usize,
    },
    /// Request to place one of the tiles in hand.
    ///
    /// The response should be a [`TileResponse`].
    PlaceTile { state: GameSnapshot },
    /// Request to place a meeple on the tile placed this turn, or to pass.
    ///
    /// The response should be a [`MeepleMove`].
    PlaceMeeple { state: GameSnapshot },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// Everything a bot gets to see about the game at the time of a request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The player the bot is playing as.
    pub me: PlayerId,
    pub num_players: usize,
    /// The number of tiles that have not been drawn yet.
    pub tiles_remaining: usize,
    /// The tiles in the bot's hand.
    #[serde(default)]
    pub hand: Vec<Tile>,
    /// The tiles on the map, in the order they were placed.
    ///
    /// Every one of them has a `placed_pos`, and their `claims` list the
    /// meeples standing on them.
    pub board: Vec<Tile>,
}

impl GameSnapshot {
    pub fn to_board(&self) -> Result<Board, InvalidBoard> {
        Board::new(self.board.iter().cloned())
    }
}

/// Specifies which tile from the hand to place, in which rotation, and where.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub hand_index: usize,
    /// The tile, already rotated the way it should be placed.
    pub tile: Tile,
    pub pos: Coord,
}

/// The answer to [`Request::PlaceTile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileResponse {
    Place(TilePlacement),
    /// The bot found no legal placement for any tile in its hand.
    NoLegalPlacement { reason: String },
}

/// The answer to [`Request::PlaceMeeple`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeepleMove {
    /// Put a meeple on `spot` of the tile at `pos`.
    Place { pos: Coord, spot: Spot },
    Pass,
}
