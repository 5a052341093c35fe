//! Load and save plan files: the serialized `{setup, events}` record

use super::{LifeEvent, Setup};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Errors raised at the plan persistence boundary. The engine itself never
/// fails; only file I/O and malformed JSON do.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted household plan: the flat setup record plus the event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub setup: Setup,
    #[serde(default)]
    pub events: Vec<LifeEvent>,
}

impl Plan {
    /// The in-code default plan (dual-income Tokyo household, stock events).
    pub fn default_plan() -> Self {
        Self {
            setup: Setup::default_tokyo_household(),
            events: super::events::default_life_events(),
        }
    }

    /// Normalize sign conventions at the boundary.
    ///
    /// Older persisted files store expense-like setup fields as negative
    /// numbers; in-memory they are magnitudes. Event amounts stay signed.
    pub fn normalize(&mut self) {
        let s = &mut self.setup;
        for cost in [
            &mut s.housing_annual_pre,
            &mut s.housing_annual_post,
            &mut s.living_annual_pre,
            &mut s.living_annual_post,
            &mut s.travel_annual,
            &mut s.person1_medical_annual,
            &mut s.person2_medical_annual,
        ] {
            *cost = cost.abs();
        }
    }
}

/// Load a plan from a JSON file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan, PlanError> {
    let file = File::open(path.as_ref())?;
    let plan = load_plan_from_reader(BufReader::new(file))?;
    log::info!(
        "loaded plan from {} ({} events)",
        path.as_ref().display(),
        plan.events.len()
    );
    Ok(plan)
}

/// Load a plan from any reader (e.g., string buffer, network stream).
pub fn load_plan_from_reader<R: std::io::Read>(reader: R) -> Result<Plan, PlanError> {
    let mut plan: Plan = serde_json::from_reader(reader)?;
    plan.normalize();
    Ok(plan)
}

/// Save a plan as pretty-printed JSON.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &Plan) -> Result<(), PlanError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), plan)?;
    log::info!("saved plan to {}", path.as_ref().display());
    Ok(())
}
