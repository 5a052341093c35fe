//! Household data model: setup record, life events, presets, persistence

mod data;
pub mod events;
pub mod loader;
mod profiles;

pub use data::{PersonParams, Setup};
pub use events::{default_life_events, LifeEvent};
pub use loader::{load_plan, load_plan_from_reader, save_plan, Plan, PlanError};
pub use profiles::{Profile, ProfileId};
