// Cell-by-cell frame comparison.
//
// Used after every game action to see exactly which pixels moved. The diff
// list is row-major so consecutive runs of the same action produce stable,
// comparable output.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::{Color, GridError, Position, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelDiff {
    pub position: Position,
    pub old_value: Color,
    pub new_value: Color,
}

/// Every position where `before` and `after` disagree, in row-major order.
pub fn diff(before: &Grid, after: &Grid) -> Result<Vec<PixelDiff>> {
    if !before.same_shape(after) {
        return Err(GridError::DimensionMismatch {
            expected: before.dimensions(),
            found: after.dimensions(),
        });
    }
    let diffs: Vec<PixelDiff> = before
        .rows()
        .zip(after.rows())
        .enumerate()
        .flat_map(|(r, (a, b))| {
            a.iter().zip(b).enumerate().filter(|(_, (x, y))| x != y).map(move |(c, (&x, &y))| {
                PixelDiff { position: Position::new(r, c), old_value: x, new_value: y }
            })
        })
        .collect();
    log::debug!("diff {}x{}: {} cells changed", before.height(), before.width(), diffs.len());
    Ok(diffs)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// The action that produced the change, e.g. `"ACTION1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub changed: usize,
    pub description: String,
    pub preview: Vec<PixelDiff>,
    pub remaining: usize,
    /// `((old, new), count)`, most frequent first.
    pub transitions: Vec<((Color, Color), usize)>,
}

/// Reduce a diff list to a count, a one-line description and a short preview.
pub fn summarize(diffs: &[PixelDiff], preview_limit: usize) -> DiffSummary {
    let changed = diffs.len();
    let description = match changed {
        0 => "No changes detected".to_string(),
        1 => "1 pixel changed".to_string(),
        n => format!("{} pixels changed", n),
    };

    let mut counts: rustc_hash::FxHashMap<(Color, Color), usize> = Default::default();
    for d in diffs {
        *counts.entry((d.old_value, d.new_value)).or_default() += 1;
    }
    let mut transitions: Vec<((Color, Color), usize)> = counts.into_iter().collect();
    transitions.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let shown = changed.min(preview_limit);
    DiffSummary {
        label: None,
        changed,
        description,
        preview: diffs[..shown].to_vec(),
        remaining: changed - shown,
        transitions,
    }
}

impl DiffSummary {
    /// Tag the summary with the action that caused it.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_unchanged(&self) -> bool {
        self.changed == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            writeln!(f, "{}:", label)?;
        }
        write!(f, "{}", self.description)?;
        for d in &self.preview {
            write!(f, "\n  {}: {} -> {}", d.position, d.old_value, d.new_value)?;
        }
        if self.remaining > 0 {
            write!(f, "\n  ... and {} more", self.remaining)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn g(rows: Vec<Vec<u8>>) -> Grid {
        Grid::new(rows).unwrap()
    }

    #[test]
    fn single_changed_pixel() {
        let a = g(vec![vec![0, 0], vec![0, 0]]);
        let b = g(vec![vec![0, 1], vec![0, 0]]);
        let diffs = diff(&a, &b).unwrap();
        assert_eq!(
            diffs,
            vec![PixelDiff { position: Position::new(0, 1), old_value: 0, new_value: 1 }]
        );
    }

    #[test]
    fn identical_grids_have_no_diff() {
        let a = g(vec![vec![3, 4, 5], vec![6, 7, 8]]);
        assert!(diff(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn diffs_are_row_major() {
        let a = g(vec![vec![0, 0, 0], vec![0, 0, 0]]);
        let b = g(vec![vec![0, 0, 2], vec![1, 0, 0]]);
        let pos: Vec<_> = diff(&a, &b).unwrap().iter().map(|d| d.position).collect();
        assert_eq!(pos, vec![Position::new(0, 2), Position::new(1, 0)]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let a = g(vec![vec![0, 0], vec![0, 0]]);
        let b = g(vec![vec![0, 0, 0], vec![0, 0, 0]]);
        assert_eq!(
            diff(&a, &b).unwrap_err(),
            GridError::DimensionMismatch { expected: (2, 2), found: (2, 3) }
        );
    }

    #[test]
    fn summary_of_no_changes() {
        let s = summarize(&[], 5);
        assert!(s.is_unchanged());
        assert_eq!(s.description, "No changes detected");
        assert_eq!(s.to_string(), "No changes detected");
    }

    #[test]
    fn summary_truncates_preview() {
        let a = Grid::filled(1, 8, 0).unwrap();
        let b = Grid::filled(1, 8, 4).unwrap();
        let diffs = diff(&a, &b).unwrap();
        let s = summarize(&diffs, 5);
        assert_eq!(s.changed, 8);
        assert_eq!(s.preview.len(), 5);
        assert_eq!(s.remaining, 3);
        assert_eq!(s.transitions, vec![((0, 4), 8)]);
        let text = s.to_string();
        assert!(text.starts_with("8 pixels changed"));
        assert!(text.contains("(0,0): 0 -> 4"));
        assert!(text.ends_with("... and 3 more"));
    }

    #[test]
    fn summary_singular_and_transitions_ordering() {
        let a = g(vec![vec![0, 0, 0, 1]]);
        let b = g(vec![vec![2, 2, 0, 3]]);
        let s = summarize(&diff(&a, &b).unwrap(), 10);
        assert_eq!(s.transitions, vec![((0, 2), 2), ((1, 3), 1)]);
        assert_eq!(s.remaining, 0);

        let one = summarize(&diff(&g(vec![vec![0]]), &g(vec![vec![1]])).unwrap(), 10);
        assert_eq!(one.description, "1 pixel changed");
    }

    #[test]
    fn labeled_summary_names_the_action() {
        let s = summarize(&diff(&g(vec![vec![0, 0]]), &g(vec![vec![0, 6]])).unwrap(), 5)
            .with_label("ACTION3");
        assert_eq!(s.label.as_deref(), Some("ACTION3"));
        assert_eq!(s.to_string(), "ACTION3:\n1 pixel changed\n  (0,1): 0 -> 6");

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["label"], "ACTION3");
        let unlabeled = serde_json::to_value(summarize(&[], 5)).unwrap();
        assert!(unlabeled.get("label").is_none());
    }

    fn grid_pair() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<Vec<u8>>)> {
        (1usize..8, 1usize..8).prop_flat_map(|(h, w)| {
            let cells = || prop::collection::vec(prop::collection::vec(0u8..16, w), h);
            (cells(), cells())
        })
    }

    proptest! {
        #[test]
        fn diff_reports_exactly_unequal_cells((a, b) in grid_pair()) {
            let ga = Grid::new(a.clone()).unwrap();
            let gb = Grid::new(b.clone()).unwrap();
            let diffs = diff(&ga, &gb).unwrap();
            let expected = (0..a.len())
                .flat_map(|r| (0..a[0].len()).map(move |c| (r, c)))
                .filter(|&(r, c)| a[r][c] != b[r][c])
                .count();
            prop_assert_eq!(diffs.len(), expected);
            for d in &diffs {
                prop_assert_eq!(a[d.position.row][d.position.col], d.old_value);
                prop_assert_eq!(b[d.position.row][d.position.col], d.new_value);
                prop_assert_ne!(d.old_value, d.new_value);
            }
        }

        #[test]
        fn diff_is_position_symmetric((a, b) in grid_pair()) {
            let ga = Grid::new(a).unwrap();
            let gb = Grid::new(b).unwrap();
            let ab = diff(&ga, &gb).unwrap();
            let ba = diff(&gb, &ga).unwrap();
            prop_assert_eq!(ab.len(), ba.len());
            for (x, y) in ab.iter().zip(&ba) {
                prop_assert_eq!(x.position, y.position);
                prop_assert_eq!(x.old_value, y.new_value);
                prop_assert_eq!(x.new_value, y.old_value);
            }
        }
    }
}
