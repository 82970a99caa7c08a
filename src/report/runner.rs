// Frame and transition reports.
// Runs the individual analyses over one frame (or a before/after pair) and
// bundles the results into a single serializable value for the reporting side.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::core::{Color, Result};
use crate::perception::{
    diff, distribution, extract_all_components, extract_components_of, extract_rectangles,
    find_column_patterns, find_row_patterns, summarize, ColorDistribution, ColumnPattern,
    Component, DiffSummary, Grid, PixelDiff, Region, RowPattern,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub height: usize,
    pub width: usize,
    pub colors: ColorDistribution,
    pub regions: Vec<Region>,
    pub components: Vec<Component>,
    pub row_patterns: Vec<RowPattern>,
    pub column_patterns: Vec<ColumnPattern>,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionReport {
    pub diffs: Vec<PixelDiff>,
    pub summary: DiffSummary,
}

/// Run every single-frame analysis on `grid`.
pub fn analyze_frame(grid: &Grid, config: &AnalysisConfig) -> FrameReport {
    let start = Instant::now();

    let components = match &config.component_colors {
        None => extract_all_components(grid),
        Some(colors) => extract_components_of(grid, colors),
    };

    let (row_patterns, column_patterns) = if config.detect_patterns {
        (find_row_patterns(grid), find_column_patterns(grid))
    } else {
        (Vec::new(), Vec::new())
    };

    let report = FrameReport {
        height: grid.height(),
        width: grid.width(),
        colors: distribution(grid),
        regions: extract_rectangles(grid, None),
        components,
        row_patterns,
        column_patterns,
        elapsed_us: start.elapsed().as_micros() as u64,
    };
    log::info!(
        "analyzed {}x{} frame: {} colors, {} regions, {} components in {}us",
        report.height,
        report.width,
        report.colors.len(),
        report.regions.len(),
        report.components.len(),
        report.elapsed_us
    );
    report
}

/// Diff two frames and summarize the change.
pub fn analyze_transition(before: &Grid, after: &Grid, config: &AnalysisConfig) -> Result<TransitionReport> {
    let diffs = diff(before, after)?;
    let summary = summarize(&diffs, config.diff_preview);
    log::info!("transition: {}", summary.description);
    Ok(TransitionReport { diffs, summary })
}

impl FrameReport {
    pub fn dominant_color(&self) -> Option<Color> {
        self.colors.dominant()
    }

    pub fn largest_region(&self) -> Option<&Region> {
        self.regions.first()
    }

    pub fn print_summary(&self) {
        println!("=== Frame {}x{} ===", self.height, self.width);
        println!("Colors: {} | Regions: {} | Components: {} | Time: {}us",
            self.colors.len(), self.regions.len(), self.components.len(), self.elapsed_us);
        println!("\nColor distribution:");
        for (color, share) in self.colors.iter() {
            println!("  {:>2}: {}", color, share);
        }
    }

    pub fn print_detail(&self) {
        self.print_summary();
        println!("\nRegions:");
        for r in &self.regions {
            println!("  color={} ({},{})-({},{}) area={}",
                r.color, r.top, r.left, r.bottom, r.right, r.area);
        }
        println!("\nComponents:");
        for comp in &self.components {
            let (top, left, bottom, right) = comp.bounding_box();
            println!("  color={} cells={} bbox=({},{})-({},{})",
                comp.color, comp.len(), top, left, bottom, right);
        }
        println!("\nPatterns:");
        for p in &self.row_patterns {
            println!("  row {}: {:?} x{} from {}",
                p.row, p.pattern.pattern, p.pattern.repeat_count, p.pattern.start_index);
        }
        for p in &self.column_patterns {
            println!("  col {}: {:?} x{} from {}",
                p.col, p.pattern.pattern, p.pattern.repeat_count, p.pattern.start_index);
        }
    }
}

impl TransitionReport {
    pub fn print_summary(&self) {
        println!("{}", self.summary);
    }
}
