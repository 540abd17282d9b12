use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use window_estimator::aggregate::by_category;
use window_estimator::calculator::{
    BAR_LENGTH, Calculator, CalculatorConfig, DEFAULT_MARGIN_PERCENT, KERF,
};
use window_estimator::catalog::Catalog;
use window_estimator::pieces::plan_cutting;
use window_estimator::project::{ProjectExport, Quote, WindowProject, margin_from_percent};
use window_estimator::render;
use window_estimator::solver::optimize;
use window_estimator::types::{CuttingPiece, Solution};

#[derive(Parser)]
#[command(
    name = "window_estimator",
    about = "Window pricing and profile cutting plans"
)]
struct Cli {
    /// Project file: JSON list of windows ({"name": .., "specs": {..}})
    #[arg(long, required_unless_present = "cuts", conflicts_with = "cuts")]
    project: Option<PathBuf>,

    /// Ad-hoc piece lengths to cut from stock bars (e.g. 400 300 200)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<f64>,

    /// Material catalog JSON ([{"reference", "designation", "average_price"}])
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Profit margin in percent
    #[arg(long, default_value_t = DEFAULT_MARGIN_PERCENT, value_parser = parse_margin)]
    margin: f64,

    /// Stock bar length in cm
    #[arg(long, default_value_t = BAR_LENGTH)]
    bar_length: f64,

    /// Saw kerf in cm
    #[arg(long, default_value_t = KERF)]
    kerf: f64,

    /// Show ASCII layout of each bar
    #[arg(long)]
    layout: bool,

    /// Write the priced project as JSON to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_margin(s: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|_| format!("invalid margin '{}'", s))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("margin must be between 0 and 100, got {}", value));
    }
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(project) = &cli.project else {
        let pieces = cli
            .cuts
            .iter()
            .enumerate()
            .map(|(i, &l)| CuttingPiece::new("cuts", format!("#{}", i + 1), l))
            .collect();
        let solution = optimize(pieces, cli.bar_length, cli.kerf)?;
        print_solution("Cuts", &solution, cli.layout);
        return Ok(());
    };

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::default(),
    };
    info!(materials = catalog.records().len(), "catalog loaded");

    let text = std::fs::read_to_string(project)
        .with_context(|| format!("Failed to read {}", project.display()))?;
    let windows: Vec<WindowProject> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", project.display()))?;

    let config = CalculatorConfig {
        bar_length: cli.bar_length,
        ..CalculatorConfig::default()
    };
    let calculator = Calculator::new(&catalog, config);
    let quote = Quote::build(&windows, margin_from_percent(cli.margin), &calculator);

    for w in &quote.windows {
        println!(
            "{} ({}x{}): {:.2}",
            w.name,
            w.specs.length,
            w.specs.width,
            w.breakdown.total_cost()
        );
    }
    println!();

    for (category, materials) in by_category(&quote.materials) {
        if materials.is_empty() {
            continue;
        }
        println!("[{}]", category);
        for m in materials {
            println!(
                "  {:<40} {:<36} x {:>8.2} = {:>9.2}  ({})",
                m.name,
                m.quantity.to_string(),
                m.unit_price,
                m.total_cost,
                m.used_in_windows.join(", ")
            );
        }
    }
    println!();

    let s = &quote.summary;
    println!(
        "Summary: {} window{}, {} materials, {:.2} total",
        quote.windows.len(),
        if quote.windows.len() == 1 { "" } else { "s" },
        s.material_count,
        s.total_cost,
    );
    println!(
        "Profile: {:.1} bars consumed, {} to buy, ~{:.0} cm waste at {:.0}% nominal efficiency",
        s.total_bars, s.purchased_bars, s.estimated_waste, s.nominal_efficiency,
    );
    println!();

    for plan in plan_cutting(&windows, cli.kerf, &config)? {
        print_solution(&format!("Cutting plan: {}", plan.group), &plan.solution, cli.layout);
    }

    if let Some(path) = &cli.export {
        let export = ProjectExport::new(quote.windows);
        std::fs::write(path, export.to_json_pretty()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("exported {}", path.display());
    }

    Ok(())
}

fn print_solution(title: &str, solution: &Solution, layout: bool) {
    println!("{title}");
    for plan in &solution.plans {
        println!(
            "Bar {}: {} cut{}, {:.1}% used ({}), {:.1} cm waste",
            plan.bar_index,
            plan.cuts.len(),
            if plan.cuts.len() == 1 { "" } else { "s" },
            plan.efficiency,
            plan.rating(),
            plan.waste,
        );
        for cut in &plan.cuts {
            println!(
                "  {:>7.1} - {:>7.1}  {} {}",
                cut.start, cut.end, cut.piece.owner, cut.piece.label
            );
        }
        if layout {
            print!("{}", render::render_bar(plan, solution.bar_length));
        }
    }
    println!(
        "Summary: {} bar{} used, {:.1}% waste, {:.1}% average efficiency",
        solution.bar_count(),
        if solution.bar_count() == 1 { "" } else { "s" },
        solution.total_waste_percent(),
        solution.average_efficiency(),
    );
    println!();
}
