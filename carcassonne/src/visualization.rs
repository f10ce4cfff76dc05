use crate::{Board, Side, Tile, TileModifier};

/// Draws the tiles on the board, three characters square per tile.
///
/// Edges use the letters of the compact tile notation. The middle shows the
/// player number of a meeple on the tile, else `M` for a monastery or `E` for
/// an emblem.
pub fn visualize_board(board: &Board) -> String {
    let Some(bbox) = board.bbox() else {
        return String::from("(empty board)");
    };
    let width = bbox.x_max - bbox.x_min + 1;

    let mut result = format!("    {:<3}", bbox.x_min);
    result += "\n    ╭";
    result += &"───".repeat(width);
    result += "╮\n";

    for y in bbox.y_min..=bbox.y_max {
        let mut lines = [String::new(), String::new(), String::new()];
        for x in bbox.x_min..=bbox.x_max {
            let cell = match board.get(crate::Coord::new(x, y)) {
                Some(tile) => draw_tile(tile),
                None => [[' '; 3]; 3],
            };
            for (line, row) in lines.iter_mut().zip(cell) {
                line.extend(row);
            }
        }
        for (i, line) in lines.iter().enumerate() {
            if i == 1 {
                result += &format!("{:>3} │{}│\n", y, line);
            } else {
                result += &format!("    │{}│\n", line);
            }
        }
    }

    result += "    ╰";
    result += &"───".repeat(width);
    result += "╯";
    result
}

fn draw_tile(tile: &Tile) -> [[char; 3]; 3] {
    let symbol = |side: Side| tile.edge(side).symbol();
    let middle = if let Some(meeple) = tile.claims.values().next() {
        char::from_digit(u32::from(meeple.player.0) % 10, 10).unwrap_or('*')
    } else if tile.has_modifier(TileModifier::Monastery) {
        'M'
    } else if tile.has_modifier(TileModifier::Emblem) {
        'E'
    } else {
        ' '
    };
    [
        [' ', symbol(Side::Top), ' '],
        [symbol(Side::Left), middle, symbol(Side::Right)],
        [' ', symbol(Side::Bottom), ' '],
    ]
}
