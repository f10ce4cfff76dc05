use carcassonne::{
    visualize_board, MeepleMove, NoLegalPlacement, PlayerId, Tile, TilePlacement,
};
use carcassonne_bot_utils::{Bot, GameView, SnapshotView};
use tracing::{debug, info, trace};

use crate::candidates::best_candidate;
use crate::meeple::meeple_move;
use crate::river::river_placement;
use crate::Config;

/// What the bot remembers between the requests of one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotState {
    /// The tile placed this turn, at its position.
    pub last_tile: Option<Tile>,
    /// How many of our meeples are on the board, counting the one placed this turn.
    pub meeples_in_play: usize,
}

/// Picks a tile from the hand and where to put it.
///
/// A river tile that continues the river is placed right away. Otherwise the
/// best scoring placement of any tile is used.
pub fn decide_tile_placement(
    view: &impl GameView,
    config: &Config,
    state: &mut BotState,
) -> Result<TilePlacement, NoLegalPlacement> {
    state.last_tile = None;

    let placement = match river_placement(view) {
        Some(placement) => placement,
        None => best_candidate(view, config)
            .ok_or_else(|| NoLegalPlacement {
                hand_size: view.hand().len(),
                placed_tiles: view.placed_tiles().len(),
            })?
            .into_placement(view.hand()),
    };
    state.last_tile = Some(placement.tile.clone());
    Ok(placement)
}

/// Claims a structure on the tile placed this turn, or passes.
pub fn decide_meeple_placement(
    view: &impl GameView,
    config: &Config,
    state: &mut BotState,
) -> MeepleMove {
    let mv = meeple_move(view, config, state.last_tile.as_ref());
    state.meeples_in_play = view.meeples_placed_by(view.me()).len();
    if let MeepleMove::Place { .. } = mv {
        state.meeples_in_play += 1;
    }
    mv
}

/// A bot that takes the best looking move each turn, without looking ahead.
pub struct GreedyBot {
    config: Config,
    state: BotState,
}

impl GreedyBot {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: BotState::default(),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }
}

impl Bot for GreedyBot {
    fn new_game(&mut self, player: PlayerId, num_players: usize) {
        info!(?player, num_players, "New game");
        self.state = BotState::default();
    }

    fn place_tile(&mut self, view: &SnapshotView) -> Result<TilePlacement, NoLegalPlacement> {
        trace!("\n{}", visualize_board(view.board()));
        let placement = decide_tile_placement(view, &self.config, &mut self.state)?;
        debug!(
            hand_index = placement.hand_index,
            tile = %placement.tile,
            pos = %placement.pos,
            "Placing tile"
        );
        Ok(placement)
    }

    fn place_meeple(&mut self, view: &SnapshotView) -> MeepleMove {
        let mv = decide_meeple_placement(view, &self.config, &mut self.state);
        debug!(?mv, meeples_in_play = self.state.meeples_in_play, "Meeple move");
        mv
    }
}

#[cfg(test)]
mod tests {
    use carcassonne::{Coord, Spot};

    use super::*;
    use crate::testing::*;

    #[test]
    fn blocked_river_falls_back_to_the_general_search() {
        let view = view(
            &["G~G~"],
            vec![at("G~GG", 85, 85), at("GGGG", 89, 85)],
        );
        let mut state = BotState::default();
        let placement = decide_tile_placement(&view, &Config::default(), &mut state).unwrap();
        assert_eq!(placement.pos, Coord::new(86, 85));
        assert_eq!(placement.tile.rotation(), 0);
        assert_eq!(state.last_tile, Some(placement.tile));
    }

    #[test]
    fn no_legal_placement_is_reported() {
        let view = view(&["GGGG"], vec![at("CCCC", 85, 85)]);
        let mut state = BotState {
            last_tile: Some(at("CCCC", 85, 85)),
            meeples_in_play: 0,
        };
        let err = decide_tile_placement(&view, &Config::default(), &mut state).unwrap_err();
        assert_eq!(
            err,
            NoLegalPlacement {
                hand_size: 1,
                placed_tiles: 1
            }
        );
        assert_eq!(state.last_tile, None);
        // Nothing to put a meeple on afterwards
        assert_eq!(
            decide_meeple_placement(&view, &Config::default(), &mut state),
            MeepleMove::Pass
        );
    }

    #[test]
    fn full_turn() {
        let config = Config::default();
        let mut state = BotState::default();

        let view_before = view(&["CGGG+M"], vec![at("CRGR", 85, 85)]);
        let placement = decide_tile_placement(&view_before, &config, &mut state).unwrap();
        // Above the start tile, city against city
        assert_eq!(placement.pos, Coord::new(85, 84));
        assert_eq!(placement.tile.rotation(), 2);

        let view_after = view(&[], vec![at("CRGR", 85, 85), placement.tile.clone()]);
        let mv = decide_meeple_placement(&view_after, &config, &mut state);
        assert_eq!(
            mv,
            MeepleMove::Place {
                pos: Coord::new(85, 84),
                spot: Spot::Monastery
            }
        );
        assert_eq!(state.meeples_in_play, 1);
    }

    #[test]
    fn meeples_in_play_follow_the_board() {
        let config = Config::default();
        let last = at("GGGG+M", 85, 85);
        let mut state = BotState {
            last_tile: Some(last.clone()),
            // Left over from an earlier turn, before meeples were returned
            meeples_in_play: 5,
        };
        let board = vec![
            at("GGGG+M", 10, 10).with_claim(Spot::Monastery, meeple(ME, 0)),
            at("GGGG+M", 20, 10).with_claim(Spot::Monastery, meeple(ME, 1)),
            at("GGGG+M", 30, 10).with_claim(Spot::Monastery, meeple(OPPONENT, 0)),
            last,
        ];
        let mv = decide_meeple_placement(&view(&[], board.clone()), &config, &mut state);
        assert!(matches!(mv, MeepleMove::Place { .. }));
        assert_eq!(state.meeples_in_play, 3);

        // Late in the game the meeple is kept, and the count stays at the board's
        let mut state = BotState {
            last_tile: state.last_tile,
            meeples_in_play: 0,
        };
        let mv = decide_meeple_placement(&view_with(&[], board, 2, 1), &config, &mut state);
        assert_eq!(mv, MeepleMove::Pass);
        assert_eq!(state.meeples_in_play, 2);
    }

    #[test]
    fn new_game_forgets_the_last_game() {
        let mut bot = GreedyBot::new(Config::default());
        bot.state = BotState {
            last_tile: Some(at("GGGG", 1, 1)),
            meeples_in_play: 4,
        };
        bot.new_game(PlayerId(0), 2);
        assert_eq!(bot.state(), &BotState::default());
    }
}
