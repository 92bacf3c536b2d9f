use crate::{Board, Square};

// Every cell is this wide: the top stone plus the stack height
const CELL_WIDTH: usize = 5;

/// Draws the board with the top stone of every square, top row first.
///
/// Flats are shown as `W`/`B`, standing stones as `WS`/`BS` and capstones as
/// `WC`/`BC`. Stacks higher than one stone get their height appended, e.g.
/// `B/3`.
pub fn visualize_top_stones(board: &Board) -> String {
    let size = board.size();
    let horizontal = "─".repeat(size * CELL_WIDTH);

    let mut result = String::from("   ╭");
    result += &horizontal;
    result += "╮\n";
    for row in (0..size as u8).rev() {
        result += &format!("{:>2} │", u16::from(row) + 1);
        for column in 0..size as u8 {
            let square = Square::new(column, row);
            let cell = match board.stack(square) {
                Some(stack) => match (stack.top(), stack.len()) {
                    (None, _) => String::from("·"),
                    (Some(top), 1) => top.to_string(),
                    (Some(top), height) => format!("{}/{}", top, height),
                },
                None => String::new(),
            };
            result += &format!("{:^width$}", cell, width = CELL_WIDTH);
        }
        result += "│\n";
    }
    result += "   ╰";
    result += &horizontal;
    result += "╯\n    ";
    for column in 0..size as u8 {
        let letter = Square::new(column, 0).to_string();
        result += &format!("{:^width$}", &letter[..1], width = CELL_WIDTH);
    }
    result
}
