pub mod colors;
pub mod diff;
pub mod grid;
pub mod patterns;
pub mod regions;

pub use colors::{distribution, ColorDistribution, ColorShare};
pub use diff::{diff, summarize, DiffSummary, PixelDiff};
pub use grid::{get_column, get_row, Grid};
pub use patterns::{
    detect_repeating_pattern, find_column_patterns, find_row_patterns, ColumnPattern, RowPattern,
    SequencePattern,
};
pub use regions::{
    extract_all_components, extract_components, extract_components_of, extract_rectangles, Component,
    Region,
};
