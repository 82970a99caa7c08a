use std::fmt;

use serde::{Deserialize, Serialize};

/// A palette index. Frames use a 16-color palette, so valid values are `0..PALETTE_SIZE`.
pub type Color = u8;

pub const PALETTE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 4-connected neighbours that fall inside a `rows x cols` grid.
    pub fn neighbors_4(self, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [(0i32, 1i32), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| {
                let nr = row as i64 + dr as i64;
                let nc = col as i64 + dc as i64;
                if nr >= 0 && nr < rows as i64 && nc >= 0 && nc < cols as i64 {
                    Some(Position::new(nr as usize, nc as usize))
                } else {
                    None
                }
            })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}
