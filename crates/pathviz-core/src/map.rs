//! Text maps: building a [`Grid`] from ASCII art and printing it back.
//!
//! | Rune | Meaning |
//! |---|---|
//! | `.` | open cell, weight 1 |
//! | `#` | wall |
//! | `S` | start marker |
//! | `E` | end marker |
//! | `1`–`9` | open cell of that weight |
//! | `0` | open cell of weight 10 |
//!
//! Lines are separated by `'\n'` and must all have the same width. Leading
//! and trailing whitespace of the whole string is trimmed, but not that of
//! individual lines.

use crate::cell::{Cell, MAX_WEIGHT, Marker};
use crate::geom::{Point, Range};
use crate::grid::{Grid, GridError};

impl Grid {
    /// Parse an ASCII map. See the [module docs](crate::map) for the
    /// alphabet.
    pub fn parse(s: &str) -> Result<Grid, GridError> {
        let s = s.trim();
        let lines: Vec<&str> = s.lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(GridError::InvalidSize {
                rows: lines.len() as i32,
                cols: 0,
            });
        }

        let bounds = Range::sized(lines.len() as i32, width as i32);
        let mut cells = Vec::with_capacity(bounds.len());
        let mut start = None;
        let mut end = None;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GridError::InconsistentWidth { line: row });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Point::new(row as i32, col as i32);
                let mut cell = Cell::OPEN;
                match ch {
                    '.' => {}
                    '#' => cell.set_wall(true),
                    'S' | 'E' => {
                        let (slot, marker) = if ch == 'S' {
                            (&mut start, Marker::Start)
                        } else {
                            (&mut end, Marker::End)
                        };
                        if slot.is_some() {
                            return Err(GridError::DuplicateMarker(pos));
                        }
                        *slot = Some(pos);
                        cell.set_marker(Some(marker));
                    }
                    '0' => cell.set_weight(MAX_WEIGHT),
                    '1'..='9' => cell.set_weight(ch as i32 - '0' as i32),
                    _ => return Err(GridError::InvalidRune { ch, pos }),
                }
                cells.push(cell);
            }
        }

        Ok(Grid::from_parts(bounds, cells, start, end))
    }

    /// Print the grid in the same alphabet [`parse`](Self::parse) accepts.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.rows() as usize);
        for (p, cell) in self.iter() {
            if p.col == 0 && p.row > 0 {
                out.push('\n');
            }
            out.push(rune(cell));
        }
        out
    }
}

fn rune(cell: Cell) -> char {
    match cell.marker() {
        Some(Marker::Start) => 'S',
        Some(Marker::End) => 'E',
        None if cell.is_wall() => '#',
        None => match cell.weight() {
            1 => '.',
            MAX_WEIGHT => '0',
            w => char::from_digit(w as u32, 10).unwrap_or('.'),
        },
    }
}
