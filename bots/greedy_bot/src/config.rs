use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The numbers behind the bot's decisions.
///
/// Every field can be left out of a config file, in which case the default is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Added to placements that extend a structure one of our meeples sits on.
    pub extension_bonus: i32,
    /// Per surrounding monastery that we have claimed.
    pub own_monastery: i32,
    /// Per surrounding monastery that we haven't claimed.
    pub other_monastery: i32,
    /// Per orthogonal neighbour whose facing edge holds one of our meeples.
    pub own_claim_neighbour: i32,
    /// Per structure the placement completes.
    pub completed_structure: i32,
    pub emblem: i32,
    /// The number of meeples each player owns.
    pub max_meeples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension_bonus: 5,
            own_monastery: 3,
            other_monastery: 1,
            own_claim_neighbour: 4,
            completed_structure: 4,
            emblem: 2,
            max_meeples: 7,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }
}
