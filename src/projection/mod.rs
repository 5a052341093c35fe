//! Projection engine and its output rows

mod engine;
mod row;

pub use engine::ProjectionEngine;
pub use row::{Projection, ProjectionRow, ProjectionSummary};
