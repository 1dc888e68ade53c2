use chrono::NaiveDate;
use indexmap::IndexSet;

use crate::constants::{INITIAL_SCORE, MAX_CONCEPTS_PER_EVENT, MAX_SCORE, MIN_SCORE};

use super::types::{ConceptMastery, HintLevel, MasteryProfile};
use super::MasteryError;

pub fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Applies one interaction to a single concept.
pub fn apply_event(concept: &mut ConceptMastery, hint_level: HintLevel, today: NaiveDate) {
    concept.attempts += 1;
    concept.last_review_date = today;
    concept.last_hint_level = hint_level;

    // Acknowledgment has a zero delta: attempt counted, score untouched
    concept.score = clamp_score(concept.score + hint_level.score_delta());
    if hint_level.counts_as_hint_usage() {
        concept.hint_usage_count += 1;
    }
}

/// Checks an event and collapses duplicate identifiers, keeping first-seen order.
/// Nothing is mutated on error.
pub fn validate_concepts<S: AsRef<str>>(concepts: &[S]) -> Result<IndexSet<&str>, MasteryError> {
    if concepts.is_empty() {
        return Err(MasteryError::EmptyConcepts);
    }
    if concepts.len() > MAX_CONCEPTS_PER_EVENT {
        return Err(MasteryError::TooManyConcepts(concepts.len()));
    }

    let mut unique = IndexSet::new();
    for concept in concepts {
        let id = concept.as_ref();
        if id.trim().is_empty() {
            return Err(MasteryError::BlankConceptId);
        }
        unique.insert(id);
    }
    Ok(unique)
}

impl MasteryProfile {
    /// Records one learner interaction against every referenced concept and
    /// rebuilds the schedule for `today`. Returns the number of distinct
    /// concepts updated.
    pub fn record_event<S: AsRef<str>>(
        &mut self,
        concepts: &[S],
        hint_level: HintLevel,
        today: NaiveDate,
    ) -> Result<usize, MasteryError> {
        let unique = validate_concepts(concepts)?;
        let updated = unique.len();

        for concept_id in unique {
            let concept = self
                .concepts
                .entry(concept_id.to_string())
                .or_insert_with(|| ConceptMastery::new(hint_level, today));
            apply_event(concept, hint_level, today);
        }

        self.recompute_schedule(today);
        Ok(updated)
    }

    /// Brings stored scores back into range: out-of-range values are clamped,
    /// NaN resets to the initial score. Returns how many concepts changed.
    pub fn repair_scores(&mut self) -> usize {
        let mut repaired = 0;
        for concept in self.concepts.values_mut() {
            let fixed = if concept.score.is_nan() {
                INITIAL_SCORE
            } else {
                clamp_score(concept.score)
            };
            if fixed != concept.score {
                concept.score = fixed;
                repaired += 1;
            }
        }
        repaired
    }
}
