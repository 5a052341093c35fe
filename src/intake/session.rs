//! Conversational intake session
//!
//! Explicit, caller-owned state for the chat flow that incrementally fills a
//! household setup: the set of user-provided fields, the running setup record,
//! and the matched preset profile. The external text-generation service stays
//! a collaborator; this module only decides what is known, what is missing,
//! and when the data is complete enough to run a projection.

use std::collections::HashSet;

use crate::household::{LifeEvent, Profile, ProfileId, Setup};

use super::extractor::{standard_extractors, FieldExtractor, SetupField};

/// Fields that must be known before a projection is worth running.
const REQUIRED_FIELDS: [SetupField; 2] =
    [SetupField::Person1BirthYear, SetupField::Person1Salary];

/// Outcome of feeding one user utterance into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Fields newly captured from this utterance
    pub captured: Vec<SetupField>,
    /// Profile matched (and applied) as a result of this utterance
    pub matched_profile: Option<ProfileId>,
    /// Whether the session now has enough data to finish
    pub complete: bool,
}

/// One user's intake conversation. Create at session start, feed each
/// utterance through [`IntakeSession::ingest`], and call
/// [`IntakeSession::finish`] once complete (or once the user confirms).
pub struct IntakeSession {
    setup: Setup,
    events: Vec<LifeEvent>,
    provided: HashSet<SetupField>,
    extractors: Vec<FieldExtractor>,
    matched_profile: Option<ProfileId>,
    reference_year: i32,
}

impl IntakeSession {
    /// Start from the stock defaults.
    pub fn new() -> Self {
        let setup = Setup::default_tokyo_household();
        let reference_year = setup.start_year;
        Self {
            setup,
            events: crate::household::default_life_events(),
            provided: HashSet::new(),
            extractors: standard_extractors(),
            matched_profile: None,
            reference_year,
        }
    }

    /// Start from a pre-selected preset profile.
    pub fn with_profile(id: ProfileId) -> Self {
        let mut session = Self::new();
        session.apply_profile(id);
        session
    }

    /// Parse one user utterance: extract any volunteered fields, then match a
    /// preset profile once household income is known.
    pub fn ingest(&mut self, text: &str) -> IngestOutcome {
        let mut captured = Vec::new();

        for extractor in &self.extractors {
            // First matching extractor wins for each field within one utterance
            if captured.contains(&extractor.field) {
                continue;
            }
            if let Some(value) = extractor.extract(text, self.reference_year) {
                extractor.field.set(&mut self.setup, value);
                self.provided.insert(extractor.field);
                captured.push(extractor.field);
            }
        }

        let mut matched = None;
        if self.matched_profile.is_none() && self.has_income_info() {
            let id = ProfileId::best_match(self.setup.household_salary());
            self.apply_profile(id);
            matched = Some(id);
        }

        log::debug!(
            "ingest captured {} fields, profile: {:?}",
            captured.len(),
            self.matched_profile
        );

        IngestOutcome {
            captured,
            matched_profile: matched,
            complete: self.is_complete(),
        }
    }

    /// Whether the utterance is a plain confirmation ("OK", "次へ", ...).
    pub fn is_confirmation(text: &str) -> bool {
        let t = text.trim().to_lowercase();
        ["ok", "yes", "go", "次へ", "大丈夫", "良い", "よし", "はい"]
            .iter()
            .any(|w| t.contains(w))
    }

    /// Apply a preset profile, keeping every field the user already provided.
    pub fn apply_profile(&mut self, id: ProfileId) {
        let profile = Profile::get(id);
        let user_setup = self.setup.clone();

        self.setup = profile.setup;
        for field in &self.provided {
            field.set(&mut self.setup, field.get(&user_setup));
        }
        self.events = profile.events;
        self.matched_profile = Some(id);
        log::info!("applied profile {:?} ({})", id, profile.name);
    }

    /// Person 1's income is the anchor for profile matching.
    fn has_income_info(&self) -> bool {
        self.provided.contains(&SetupField::Person1Salary)
    }

    /// Required fields not yet provided by the user or a profile.
    pub fn missing_fields(&self) -> Vec<SetupField> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !self.provided.contains(f) && self.matched_profile.is_none())
            .collect()
    }

    /// Complete once every required field is known, either directly from the
    /// user or through a matched profile.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn matched_profile(&self) -> Option<ProfileId> {
        self.matched_profile
    }

    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    /// Terminal action: hand the collected data to the projection engine.
    pub fn finish(self) -> (Setup, Vec<LifeEvent>) {
        (self.setup, self.events)
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}
