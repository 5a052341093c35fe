//! Lifeplan - household lifetime financial projection engine
//!
//! This library provides:
//! - Year-by-year income/expense/tax/asset projections for a two-person household
//! - Life-event modeling (education costs, home purchase, inheritance, ...)
//! - An age-90 coverage guarantee on the projection horizon
//! - Preset household profiles and a conversational intake layer to fill them
//! - Plan persistence as a flat `{setup, events}` JSON record

pub mod format;
pub mod household;
pub mod intake;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use household::{LifeEvent, Plan, PlanError, Setup};
pub use intake::IntakeSession;
pub use projection::{Projection, ProjectionEngine, ProjectionRow};
pub use scenario::ScenarioRunner;
