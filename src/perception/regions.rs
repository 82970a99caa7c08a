// Region extraction over a frame grid.
//
// Two independent decompositions:
// 1. Rectangles: a greedy row-major packing of monochrome axis-aligned blocks.
//    The result depends on scan order. It is *a* valid tiling, not the one with
//    the fewest or largest rectangles, and several tilings can exist for the same
//    grid. Single cells are never reported.
// 2. Components: 4-connected monochrome cell sets found with an explicit
//    work-list, so a 64x64 single-color frame (4096 cells) needs no recursion.
//
// Visited masks live on the stack of each call; nothing is shared between calls.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::{Color, Position, PALETTE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub color: Color,
    pub area: usize,
}

impl Region {
    fn new(top: usize, left: usize, bottom: usize, right: usize, color: Color) -> Self {
        let area = (bottom - top + 1) * (right - left + 1);
        Self { top, left, bottom, right, color, area }
    }

    pub fn height(&self) -> usize { self.bottom - self.top + 1 }
    pub fn width(&self) -> usize { self.right - self.left + 1 }

    pub fn contains(&self, pos: Position) -> bool {
        (self.top..=self.bottom).contains(&pos.row) && (self.left..=self.right).contains(&pos.col)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (top, bottom, left, right) = (self.top, self.bottom, self.left, self.right);
        (top..=bottom).flat_map(move |r| (left..=right).map(move |c| Position::new(r, c)))
    }
}

/// Greedy rectangle packing in row-major order.
///
/// Each unvisited cell matching `target` (any color when `None`) seeds a
/// rectangle: grow right while the color holds, then grow down one full row at a
/// time until a row breaks. Cells already claimed by an earlier rectangle stop
/// growth, so regions never overlap: in `[[2,1],[1,1]]` the seed at (1,0) stays
/// a single cell instead of taking (1,1) a second time. A plain greedy scan
/// without that check reports two area-2 regions sharing (1,1).
///
/// Output is sorted by area, largest first, with ties kept in discovery order.
pub fn extract_rectangles(grid: &Grid, target: Option<Color>) -> Vec<Region> {
    let (rows, cols) = grid.dimensions();
    let mut visited = grid.visited_mask();
    let mut regions = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            if visited[r][c] { continue; }
            let color = grid.at(r, c);
            if target.is_some_and(|t| t != color) { continue; }

            let mut right = c;
            while right + 1 < cols && !visited[r][right + 1] && grid.at(r, right + 1) == color {
                right += 1;
            }

            let mut bottom = r;
            while bottom + 1 < rows
                && (c..=right).all(|cc| !visited[bottom + 1][cc] && grid.at(bottom + 1, cc) == color)
            {
                bottom += 1;
            }

            for row in visited.iter_mut().take(bottom + 1).skip(r) {
                row[c..=right].fill(true);
            }

            let region = Region::new(r, c, bottom, right, color);
            if region.area > 1 {
                regions.push(region);
            }
        }
    }

    // Stable: equal areas stay in row-major discovery order.
    regions.sort_by(|a, b| b.area.cmp(&a.area));
    log::debug!("extract_rectangles(target={:?}): {} regions", target, regions.len());
    regions
}

/// A maximal 4-connected set of same-colored cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component {
    pub color: Color,
    /// Member cells in row-major order.
    pub cells: Vec<Position>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.binary_search(&pos).is_ok()
    }

    /// Smallest region-shaped box around the component: `(top, left, bottom, right)`.
    pub fn bounding_box(&self) -> (usize, usize, usize, usize) {
        let top = self.cells.iter().map(|p| p.row).min().unwrap_or(0);
        let left = self.cells.iter().map(|p| p.col).min().unwrap_or(0);
        let bottom = self.cells.iter().map(|p| p.row).max().unwrap_or(0);
        let right = self.cells.iter().map(|p| p.col).max().unwrap_or(0);
        (top, left, bottom, right)
    }
}

fn flood_from(grid: &Grid, seed: Position, visited: &mut [Vec<bool>]) -> Component {
    let (rows, cols) = grid.dimensions();
    let color = grid.at(seed.row, seed.col);
    let mut cells = Vec::new();
    let mut stack = vec![seed];
    visited[seed.row][seed.col] = true;

    while let Some(pos) = stack.pop() {
        cells.push(pos);
        for n in pos.neighbors_4(rows, cols) {
            if !visited[n.row][n.col] && grid.at(n.row, n.col) == color {
                visited[n.row][n.col] = true;
                stack.push(n);
            }
        }
    }
    cells.sort_unstable();
    Component { color, cells }
}

fn components_where(grid: &Grid, matches: impl Fn(Color) -> bool) -> Vec<Component> {
    let mut visited = grid.visited_mask();
    let mut components = Vec::new();
    for (pos, color) in grid.cells() {
        if visited[pos.row][pos.col] || !matches(color) { continue; }
        components.push(flood_from(grid, pos, &mut visited));
    }
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}

/// Every 4-connected component of `color`, largest first, ties in discovery order.
pub fn extract_components(grid: &Grid, color: Color) -> Vec<Component> {
    let components = components_where(grid, |c| c == color);
    log::debug!("extract_components(color={}): {} components", color, components.len());
    components
}

/// Components of any color in `colors`, from one row-major sweep.
///
/// A color listed twice is still filled once. Ties in size keep discovery
/// order across colors, not the order of `colors`.
pub fn extract_components_of(grid: &Grid, colors: &[Color]) -> Vec<Component> {
    let mut wanted = [false; PALETTE_SIZE];
    for &c in colors {
        if let Some(slot) = wanted.get_mut(c as usize) {
            *slot = true;
        }
    }
    let components = components_where(grid, |c| wanted[c as usize]);
    log::debug!("extract_components_of(colors={:?}): {} components", colors, components.len());
    components
}

/// Components of every color in one sweep, largest first, ties in discovery order.
pub fn extract_all_components(grid: &Grid) -> Vec<Component> {
    let components = components_where(grid, |_| true);
    log::debug!("extract_all_components: {} components", components.len());
    components
}
