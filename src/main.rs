use anyhow::Context;
use gridlens::config::AnalysisConfig;
use gridlens::perception::{
    detect_repeating_pattern, diff, extract_components, extract_rectangles, summarize, Grid,
};
use gridlens::report::{analyze_frame, analyze_transition};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::load(&path)?,
        None => AnalysisConfig::default(),
    };

    println!("gridlens: frame analysis engine");
    println!("==============================\n");

    demo_regions()?;
    demo_patterns();
    demo_diff(&config)?;
    demo_report(&config)?;

    Ok(())
}

fn demo_regions() -> anyhow::Result<()> {
    println!("--- Regions ---");
    let grid = Grid::new(vec![
        vec![1, 1, 2],
        vec![1, 1, 2],
        vec![3, 3, 3],
    ])?;
    for r in extract_rectangles(&grid, None) {
        println!("  rect color={} ({},{})-({},{}) area={}", r.color, r.top, r.left, r.bottom, r.right, r.area);
    }
    let comps = extract_components(&grid, 1);
    println!("  color 1: {} component(s), largest {} cells", comps.len(), comps.first().map_or(0, |c| c.len()));
    Ok(())
}

fn demo_patterns() {
    println!("\n--- Patterns ---");
    for seq in [vec![1, 2, 1, 2, 1, 2], vec![5, 5, 5, 5], vec![1, 2, 3, 4]] {
        match detect_repeating_pattern(&seq) {
            Some(p) => println!("  {:?} => {:?} x{} from {}", seq, p.pattern, p.repeat_count, p.start_index),
            None => println!("  {:?} => none", seq),
        }
    }
}

fn demo_diff(config: &AnalysisConfig) -> anyhow::Result<()> {
    println!("\n--- Diff ---");
    let before = Grid::new(vec![vec![0, 0], vec![0, 0]])?;
    let after = Grid::new(vec![vec![0, 1], vec![0, 0]])?;
    let diffs = diff(&before, &after)?;
    println!("{}", summarize(&diffs, config.diff_preview).with_label("ACTION6 at (0,1)"));
    Ok(())
}

fn demo_report(config: &AnalysisConfig) -> anyhow::Result<()> {
    println!("\n--- Frame report ---");
    let before = Grid::new(
        (0..8).map(|r| (0..8).map(|c| if r < 2 { ((c % 2) * 4) as u8 } else { 0 }).collect()).collect(),
    )?;
    let mut rows = before.clone().into_rows();
    for row in rows.iter_mut().skip(3).take(2) {
        row[2..5].fill(9);
    }
    let after = Grid::new(rows)?;

    let report = analyze_frame(&after, config);
    report.print_detail();
    println!("\n{}", serde_json::to_string(&report.colors).context("serializing color distribution")?);

    println!();
    analyze_transition(&before, &after, config)?.print_summary();
    Ok(())
}
