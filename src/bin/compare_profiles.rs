//! Compare projections across the built-in household profiles
//!
//! Usage: cargo run --bin compare_profiles

use lifeplan::format::format_yen;
use lifeplan::household::Profile;
use lifeplan::projection::{ProjectionEngine, ProjectionSummary};
use rayon::prelude::*;
use std::time::Instant;

fn main() {
    env_logger::init();

    let start = Instant::now();
    let profiles = Profile::all();
    println!("Running projections for {} profiles...", profiles.len());

    let results: Vec<(String, ProjectionSummary)> = profiles
        .par_iter()
        .map(|profile| {
            let engine =
                ProjectionEngine::new(profile.setup.clone(), profile.events.clone());
            (profile.name.to_string(), engine.generate().summary())
        })
        .collect();

    println!("Done in {:?}\n", start.elapsed());

    println!(
        "{:<16} {:>6} {:>12} {:>12} {:>12} {:>14}",
        "Profile", "Years", "Income", "Expense", "Final", "Lowest (year)"
    );
    println!("{}", "-".repeat(78));

    for (name, summary) in &results {
        println!(
            "{:<16} {:>6} {:>12} {:>12} {:>12} {:>9} ({})",
            name,
            summary.years,
            format_yen(summary.total_income),
            format_yen(summary.total_expense),
            format_yen(summary.final_asset),
            format_yen(summary.min_asset),
            summary.min_asset_year,
        );
        if let Some(year) = summary.depleted_year {
            println!("{:<16}   assets deplete in {}", "", year);
        }
    }
}
