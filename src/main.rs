//! Lifeplan CLI
//!
//! Runs a household projection from a plan file (or the built-in defaults)
//! and prints the year-by-year table plus a summary.

use anyhow::Context;
use clap::Parser;
use lifeplan::format::{format_percent, format_yen};
use lifeplan::household::{load_plan, Plan};
use lifeplan::ProjectionEngine;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lifeplan", about = "Household lifetime financial projection")]
struct Args {
    /// Plan file (JSON `{setup, events}` record); built-in defaults if omitted
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Override the projection horizon in years
    #[arg(short, long)]
    years: Option<u32>,

    /// Write the full projection to a CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every year instead of the first 25
    #[arg(long)]
    full: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let plan = match &args.plan {
        Some(path) => load_plan(path).with_context(|| format!("loading {}", path.display()))?,
        None => Plan::default_plan(),
    };

    let mut setup = plan.setup;
    if let Some(years) = args.years {
        setup.years = years as f64;
    }

    println!("Lifeplan v{}", env!("CARGO_PKG_VERSION"));
    println!("==========\n");
    println!("Start year:     {}", setup.start_year);
    println!("Initial asset:  {}", format_yen(setup.initial_asset));
    println!(
        "Invest return:  {} / inflation {}",
        format_percent(setup.invest_return),
        format_percent(setup.inflation)
    );
    println!("Events:         {}", plan.events.len());
    println!();

    let engine = ProjectionEngine::new(setup, plan.events);
    let projection = engine.generate();

    println!("Projection ({} years):", projection.len());
    println!(
        "{:>5} {:>4} {:>4} {:>5} {:>13} {:>13} {:>12} {:>13} {:>14}",
        "Year", "Age1", "Age2", "Child", "Income", "Expense", "Tax", "NetCF", "Asset"
    );
    println!("{}", "-".repeat(92));

    let shown = if args.full {
        projection.rows.len()
    } else {
        25
    };
    for row in projection.rows.iter().take(shown) {
        println!(
            "{:>5} {:>4} {:>4} {:>5} {:>13.0} {:>13.0} {:>12.0} {:>13.0} {:>14.0}",
            row.year,
            row.person1_age,
            row.person2_age,
            row.child_age,
            row.income,
            row.expense,
            row.tax,
            row.net_cash_flow,
            row.asset,
        );
    }
    if projection.rows.len() > shown {
        println!("... ({} more years)", projection.rows.len() - shown);
    }

    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Years:          {}", summary.years);
    println!("  Total income:   {}", format_yen(summary.total_income));
    println!("  Total expense:  {}", format_yen(summary.total_expense));
    println!("  Total tax:      {}", format_yen(summary.total_tax));
    println!("  Final asset:    {}", format_yen(summary.final_asset));
    println!(
        "  Lowest asset:   {} (in {})",
        format_yen(summary.min_asset),
        summary.min_asset_year
    );
    match summary.depleted_year {
        Some(year) => println!("  Assets deplete in {}", year),
        None => println!("  Assets never deplete"),
    }

    if let Some(path) = &args.output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &projection.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
