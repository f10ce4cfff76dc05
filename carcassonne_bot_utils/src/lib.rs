mod view;
pub use view::*;

use anyhow::Context;
use carcassonne::{
    MeepleMove, NoLegalPlacement, Okay, PlayerId, Request, TilePlacement, TileResponse,
};
use tracing::{error, trace};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player: PlayerId, num_players: usize);
    fn place_tile(&mut self, view: &SnapshotView) -> Result<TilePlacement, NoLegalPlacement>;
    fn place_meeple(&mut self, view: &SnapshotView) -> MeepleMove;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the engine has exited.
                break Ok(());
            }
            trace!(request = buf.trim_end(), "Received request");

            let req = serde_json::from_str::<Request>(buf.trim_end())
                .context("Could not parse request")?;

            match req {
                Request::NewGame {
                    player,
                    num_players,
                } => {
                    self.new_game(player, num_players);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlaceTile { state } => {
                    let view = SnapshotView::new(state).context("Invalid board in request")?;
                    let response = match self.place_tile(&view) {
                        Ok(placement) => TileResponse::Place(placement),
                        Err(err) => {
                            error!(%err, "No legal tile placement");
                            TileResponse::NoLegalPlacement {
                                reason: err.to_string(),
                            }
                        }
                    };
                    serde_json::to_writer(&mut stdout, &response)?
                }
                Request::PlaceMeeple { state } => {
                    let view = SnapshotView::new(state).context("Invalid board in request")?;
                    serde_json::to_writer(&mut stdout, &self.place_meeple(&view))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
