//! A Carcassonne bot that picks the best looking move each turn.
//!
//! Tile placements continue the river if possible, then prefer to extend
//! structures the bot already claimed. Meeples go on monasteries first, then
//! cities, then roads.

mod bot;
mod candidates;
mod config;
mod meeple;
mod river;
mod scoring;
#[cfg(test)]
mod testing;

pub use bot::*;
pub use candidates::{best_candidate, Candidate, SEARCH_ORDER};
pub use config::Config;
pub use meeple::meeple_move;
pub use river::river_placement;
pub use scoring::score_placement;
