use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::{Color, PALETTE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorShare {
    pub count: usize,
    /// Share of all cells, in percent, rounded to one decimal.
    pub percentage: f64,
}

impl fmt::Display for ColorShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.count, self.percentage)
    }
}

/// Per-color cell counts, keyed by color. Colors absent from the grid have no entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorDistribution(BTreeMap<Color, ColorShare>);

impl ColorDistribution {
    pub fn get(&self, color: Color) -> Option<&ColorShare> {
        self.0.get(&color)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, &ColorShare)> {
        self.0.iter().map(|(&c, s)| (c, s))
    }

    pub fn colors(&self) -> Vec<Color> {
        self.0.keys().copied().collect()
    }

    /// Sum of all counts; equals the grid's cell count.
    pub fn total(&self) -> usize {
        self.0.values().map(|s| s.count).sum()
    }

    /// Most frequent color. Ties go to the lowest color code.
    pub fn dominant(&self) -> Option<Color> {
        self.0
            .iter()
            .fold(None, |best: Option<(Color, usize)>, (&c, s)| match best {
                Some((_, n)) if n >= s.count => best,
                _ => Some((c, s.count)),
            })
            .map(|(c, _)| c)
    }
}

pub fn distribution(grid: &Grid) -> ColorDistribution {
    let mut counts = [0usize; PALETTE_SIZE];
    for row in grid.rows() {
        for &c in row {
            counts[c as usize] += 1;
        }
    }
    let total = grid.cell_count() as f64;
    let map = counts
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(c, &count)| {
            let percentage = (count as f64 / total * 1000.0).round() / 10.0;
            (c as Color, ColorShare { count, percentage })
        })
        .collect();
    ColorDistribution(map)
}
