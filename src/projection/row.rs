//! Projection output structures

use serde::{Deserialize, Serialize};

/// One simulated year's full financial snapshot.
///
/// `income`, `expense`, and `tax` are magnitudes; `net_cash_flow` is
/// `income - expense - tax`. `asset` is the post-growth, post-cashflow balance
/// at the end of the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: i32,
    pub person1_age: i32,
    pub person2_age: i32,
    pub child_age: i32,
    pub income: f64,
    pub expense: f64,
    pub tax: f64,
    pub net_cash_flow: f64,
    pub asset: f64,
}

/// Complete projection: one row per simulated year, in year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub rows: Vec<ProjectionRow>,
}

impl Projection {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Summary statistics across the whole horizon.
    pub fn summary(&self) -> ProjectionSummary {
        let total_income: f64 = self.rows.iter().map(|r| r.income).sum();
        let total_expense: f64 = self.rows.iter().map(|r| r.expense).sum();
        let total_tax: f64 = self.rows.iter().map(|r| r.tax).sum();
        let total_net_cash_flow: f64 = self.rows.iter().map(|r| r.net_cash_flow).sum();

        let final_asset = self.rows.last().map(|r| r.asset).unwrap_or(0.0);
        let (min_asset, min_asset_year) = self
            .rows
            .iter()
            .map(|r| (r.asset, r.year))
            .fold((f64::INFINITY, 0), |acc, cur| {
                if cur.0 < acc.0 {
                    cur
                } else {
                    acc
                }
            });
        let depleted_year = self.rows.iter().find(|r| r.asset < 0.0).map(|r| r.year);

        ProjectionSummary {
            years: self.rows.len() as u32,
            total_income,
            total_expense,
            total_tax,
            total_net_cash_flow,
            final_asset,
            min_asset: if self.rows.is_empty() { 0.0 } else { min_asset },
            min_asset_year,
            depleted_year,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_income: f64,
    pub total_expense: f64,
    pub total_tax: f64,
    pub total_net_cash_flow: f64,
    pub final_asset: f64,
    pub min_asset: f64,
    pub min_asset_year: i32,
    /// First year the asset balance goes negative, if it ever does
    pub depleted_year: Option<i32>,
}
