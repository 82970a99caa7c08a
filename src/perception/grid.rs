// Validated frame grid.
//
// A frame arrives from the game API as nested arrays of palette indices.
// `Grid` is the only way the analysis code sees one: construction checks the
// shape and palette once, so every analysis can index freely afterwards.

use serde::{Deserialize, Serialize};

use crate::core::{Axis, Color, GridError, Position, Result, PALETTE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Color>>", into = "Vec<Vec<Color>>")]
pub struct Grid {
    rows: Vec<Vec<Color>>,
    width: usize,
}

impl Grid {
    /// Validate `rows` and wrap them.
    ///
    /// Fails with [`GridError::InvalidGrid`] when the grid is empty, when any
    /// row length differs from the first, or when a value is outside the palette.
    pub fn new(rows: Vec<Vec<Color>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(GridError::InvalidGrid("grid has no rows".into()));
        };
        let width = first.len();
        if width == 0 {
            return Err(GridError::InvalidGrid("grid has zero-width rows".into()));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::InvalidGrid(format!(
                    "row {} has length {}, expected {}",
                    r,
                    row.len(),
                    width
                )));
            }
            if let Some((c, &v)) = row.iter().enumerate().find(|(_, &v)| v as usize >= PALETTE_SIZE) {
                return Err(GridError::InvalidGrid(format!(
                    "value {} at ({},{}) is outside the {}-color palette",
                    v, r, c, PALETTE_SIZE
                )));
            }
        }
        Ok(Self { rows, width })
    }

    /// A `height x width` grid filled with one color.
    pub fn filled(height: usize, width: usize, color: Color) -> Result<Self> {
        Self::new(vec![vec![color; width]; height])
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height(), self.width)
    }

    pub fn cell_count(&self) -> usize {
        self.height() * self.width
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height() && pos.col < self.width
    }

    pub fn get(&self, pos: Position) -> Option<Color> {
        self.rows.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    /// Direct access for positions already known to be in bounds.
    pub(crate) fn at(&self, row: usize, col: usize) -> Color {
        self.rows[row][col]
    }

    pub fn row(&self, index: usize) -> Result<&[Color]> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(GridError::IndexOutOfRange { axis: Axis::Row, index, len: self.height() })
    }

    pub fn column(&self, index: usize) -> Result<Vec<Color>> {
        if index >= self.width {
            return Err(GridError::IndexOutOfRange { axis: Axis::Column, index, len: self.width });
        }
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = Vec<Color>> + '_ {
        (0..self.width).map(move |c| self.rows.iter().map(|row| row[c]).collect())
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = self.dimensions();
        (0..rows).flat_map(move |r| (0..cols).map(move |c| Position::new(r, c)))
    }

    /// Every `(position, color)` pair in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &v)| (Position::new(r, c), v))
        })
    }

    /// Colors present in the grid, ascending.
    pub fn unique_colors(&self) -> Vec<Color> {
        let mut seen = [false; PALETTE_SIZE];
        for row in &self.rows {
            for &c in row {
                seen[c as usize] = true;
            }
        }
        (0..PALETTE_SIZE as Color).filter(|&c| seen[c as usize]).collect()
    }

    /// A fresh `height x width` boolean mask, all `false`.
    pub(crate) fn visited_mask(&self) -> Vec<Vec<bool>> {
        vec![vec![false; self.width]; self.height()]
    }

    pub fn into_rows(self) -> Vec<Vec<Color>> {
        self.rows
    }
}

impl TryFrom<Vec<Vec<Color>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Color>>) -> Result<Self> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<Vec<Color>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

/// Free-function form of [`Grid::row`].
pub fn get_row(grid: &Grid, index: usize) -> Result<&[Color]> {
    grid.row(index)
}

/// Free-function form of [`Grid::column`].
pub fn get_column(grid: &Grid, index: usize) -> Result<Vec<Color>> {
    grid.column(index)
}
