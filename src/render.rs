#![cfg(feature = "std")]

//! Text rendering of boards and coordinate parsing for the terminal game.

use std::fmt::Write;
use std::string::String;

use crate::board::{CellState, Gameboard};
use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Column letter plus one-based row, e.g. `(4, 0)` is `A5`.
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse `A5`-style input into `(row, col)`.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("need a column letter and a row number (e.g. A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("no column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("invalid column '{}'", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("column '{}' is off the board", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid row '{}'", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("row {} is off the board", row));
    }
    Ok((row - 1, col))
}

fn header(out: &mut String) {
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
}

/// Render `board`. With `reveal` unhit ship cells show as `S`; otherwise only
/// hits and misses are visible.
pub fn render_board(board: &Gameboard, reveal: bool) -> String {
    let mut out = String::new();
    header(&mut out);
    for r in 0..BOARD_SIZE {
        let _ = write!(out, " {:2} ", r + 1);
        for c in 0..BOARD_SIZE {
            let ch = match board.cell_state(r, c) {
                Ok(CellState::Hit) => 'X',
                Ok(CellState::Miss) => 'o',
                _ if reveal && board.ship_at(r, c).is_some() => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    out
}

/// One line per ship: size, hits taken and whether it is sunk.
pub fn render_fleet_status(board: &Gameboard) -> String {
    let mut out = String::new();
    for (i, status) in board.fleet_status().iter().enumerate() {
        let state = if status.sunk { "SUNK" } else { "afloat" };
        let _ = writeln!(
            out,
            "    ship {} (size {}): {}/{} hits, {}",
            i + 1,
            status.size,
            status.hits,
            status.size,
            state
        );
    }
    out
}

/// The enemy board above the player's own, fleet status last.
pub fn render_player_view(own: &Gameboard, enemy: &Gameboard) -> String {
    let mut out = String::from("Enemy waters:\n");
    out.push_str(&render_board(enemy, false));
    out.push_str("\nYour fleet:\n");
    out.push_str(&render_board(own, true));
    out.push_str(&render_fleet_status(own));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Direction;

    #[test]
    fn coords_parse_and_format() {
        assert_eq!(parse_coord("A5"), Ok((4, 0)));
        assert_eq!(parse_coord(" j10 "), Ok((9, 9)));
        assert!(parse_coord("K1").is_err());
        assert!(parse_coord("A0").is_err());
        assert!(parse_coord("A11").is_err());
        assert!(parse_coord("5A").is_err());
        assert_eq!(coord_to_string(4, 0), "A5");
    }

    #[test]
    fn hidden_board_shows_only_shots() {
        let mut board = Gameboard::new();
        board.place_ship(2, 0, 0, Direction::Horizontal).unwrap();
        board.receive_attack(0, 0);
        board.receive_attack(5, 5);
        let hidden = render_board(&board, false);
        assert!(!hidden.contains('S'));
        assert!(hidden.contains('X'));
        assert!(hidden.contains('o'));
        let shown = render_board(&board, true);
        assert!(shown.contains('S'));
    }
}
