//! Conversational intake: field extraction and session state
//!
//! Everything here sits outside the projection engine; it only produces the
//! `(Setup, Vec<LifeEvent>)` pair the engine consumes.

mod extractor;
mod session;

pub use extractor::{standard_extractors, FieldExtractor, Normalizer, SetupField, Unit};
pub use session::{IngestOutcome, IntakeSession};
