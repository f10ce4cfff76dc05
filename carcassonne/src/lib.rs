pub use board::*;
pub use errors::*;
pub use protocol::*;
pub use tile::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod protocol;
mod tile;
mod visualization;
