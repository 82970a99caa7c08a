// Repeating-unit detection over rows and columns.
//
// Search order is length first, then start index. The first unit that repeats
// at least twice back to back and spans at least half the sequence wins, so a
// short unit late in the sequence beats a longer one at index 0.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::Color;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequencePattern {
    pub pattern: Vec<Color>,
    pub pattern_length: usize,
    pub repeat_count: usize,
    pub start_index: usize,
}

impl SequencePattern {
    /// Number of elements covered by the repeats.
    pub fn span(&self) -> usize {
        self.pattern_length * self.repeat_count
    }

    /// Index one past the last covered element.
    pub fn end_index(&self) -> usize {
        self.start_index + self.span()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPattern {
    pub row: usize,
    #[serde(flatten)]
    pub pattern: SequencePattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPattern {
    pub col: usize,
    #[serde(flatten)]
    pub pattern: SequencePattern,
}

fn count_repeats(seq: &[Color], start: usize, len: usize) -> usize {
    let unit = &seq[start..start + len];
    seq[start..].chunks_exact(len).take_while(|chunk| *chunk == unit).count()
}

/// Earliest, shortest repeating unit in `seq`, if any qualifies.
pub fn detect_repeating_pattern(seq: &[Color]) -> Option<SequencePattern> {
    let n = seq.len();
    for len in 1..=n / 2 {
        for start in 0..n - len {
            let repeats = count_repeats(seq, start, len);
            // repeats * len >= ceil(n / 2)
            if repeats >= 2 && 2 * repeats * len >= n {
                return Some(SequencePattern {
                    pattern: seq[start..start + len].to_vec(),
                    pattern_length: len,
                    repeat_count: repeats,
                    start_index: start,
                });
            }
        }
    }
    None
}

pub fn find_row_patterns(grid: &Grid) -> Vec<RowPattern> {
    let found: Vec<RowPattern> = grid
        .rows()
        .enumerate()
        .filter_map(|(row, seq)| detect_repeating_pattern(seq).map(|pattern| RowPattern { row, pattern }))
        .collect();
    log::debug!("find_row_patterns: {}/{} rows", found.len(), grid.height());
    found
}

pub fn find_column_patterns(grid: &Grid) -> Vec<ColumnPattern> {
    let found: Vec<ColumnPattern> = grid
        .columns()
        .enumerate()
        .filter_map(|(col, seq)| detect_repeating_pattern(&seq).map(|pattern| ColumnPattern { col, pattern }))
        .collect();
    log::debug!("find_column_patterns: {}/{} columns", found.len(), grid.width());
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(seq: &[u8]) -> Option<(Vec<u8>, usize, usize, usize)> {
        detect_repeating_pattern(seq)
            .map(|p| (p.pattern, p.pattern_length, p.repeat_count, p.start_index))
    }

    #[test]
    fn alternating_pair() {
        assert_eq!(detect(&[1, 2, 1, 2, 1, 2]), Some((vec![1, 2], 2, 3, 0)));
    }

    #[test]
    fn constant_run() {
        assert_eq!(detect(&[5, 5, 5, 5]), Some((vec![5], 1, 4, 0)));
    }

    #[test]
    fn no_repeat() {
        assert_eq!(detect(&[1, 2, 3, 4]), None);
    }

    #[test]
    fn too_short_sequences() {
        assert_eq!(detect(&[]), None);
        assert_eq!(detect(&[7]), None);
        assert_eq!(detect(&[7, 8]), None);
        assert_eq!(detect(&[7, 7]), Some((vec![7], 1, 2, 0)));
    }

    #[test]
    fn shortest_unit_wins_even_if_later() {
        // [1,2] repeats at 0 covering 4 of 8, but [3] x4 at index 4 is shorter.
        assert_eq!(detect(&[1, 2, 1, 2, 3, 3, 3, 3]), Some((vec![3], 1, 4, 4)));
    }

    #[test]
    fn coverage_must_reach_half() {
        // [0] x2 covers 2 of 8; [4,5,6] x2 covers 6.
        assert_eq!(detect(&[0, 0, 4, 5, 6, 4, 5, 6]), Some((vec![4, 5, 6], 3, 2, 2)));
        // Odd length: 2 of 5 is below ceil(2.5) = 3.
        assert_eq!(detect(&[9, 9, 1, 2, 3]), None);
        assert_eq!(detect(&[9, 9, 9, 2, 3]), Some((vec![9], 1, 3, 0)));
    }

    #[test]
    fn leftmost_start_among_equal_lengths() {
        assert_eq!(detect(&[1, 1, 1, 2, 2, 2]), Some((vec![1], 1, 3, 0)));
        assert_eq!(detect(&[4, 1, 1, 1, 1, 2, 2, 2]), Some((vec![1], 1, 4, 1)));
        // [1] x3 covers 3 of 8, short of half; [2] x4 covers 4.
        assert_eq!(detect(&[4, 1, 1, 1, 2, 2, 2, 2]), Some((vec![2], 1, 4, 4)));
    }

    #[test]
    fn span_helpers() {
        let p = detect_repeating_pattern(&[0, 3, 4, 3, 4, 3, 4]).unwrap();
        assert_eq!(p.start_index, 1);
        assert_eq!(p.span(), 6);
        assert_eq!(p.end_index(), 7);
    }

    #[test]
    fn row_and_column_sweeps() {
        let grid = Grid::new(vec![
            vec![1, 2, 1, 2],
            vec![1, 3, 5, 7],
            vec![1, 2, 1, 2],
        ])
        .unwrap();
        let rows = find_row_patterns(&grid);
        assert_eq!(rows.iter().map(|r| r.row).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(rows[0].pattern.pattern, vec![1, 2]);

        let cols = find_column_patterns(&grid);
        // Column 0 is [1,1,1]; 1, 2 and 3 have no qualifying repeat.
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].col, 0);
        assert_eq!(cols[0].pattern.repeat_count, 3);
    }

    #[test]
    fn tagged_patterns_serialize_flat() {
        let grid = Grid::new(vec![vec![6, 6]]).unwrap();
        let rows = find_row_patterns(&grid);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["row"], 0);
        assert_eq!(json["pattern"], serde_json::json!([6]));
        assert_eq!(json["repeat_count"], 2);
    }
}
