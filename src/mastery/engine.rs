use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::store::{ProfileRepository, StoreError};

use super::clock::Clock;
use super::readiness::{ProfileSummary, ReviewItem, WeakConcept};
use super::types::{ExamReadiness, HintLevel, MasteryProfile};
use super::MasteryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(#[from] MasteryError),
    /// The in-memory profile already holds the update; only the write failed.
    #[error("failed to persist mastery profile: {0}")]
    Persistence(#[from] StoreError),
    #[error("persistence task failed: {0}")]
    Task(String),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Owns one learner's profile and writes it through to the repository after
/// every mutation. Callers serialize access; there is no internal locking.
pub struct MasteryEngine {
    profile: MasteryProfile,
    profile_key: String,
    flush_on_write: bool,
    weak_threshold: f64,
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl MasteryEngine {
    /// Loads the profile stored under the configured key, or starts a fresh one.
    pub async fn open(
        repository: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let key = config.profile_key.clone();
        let loader = Arc::clone(&repository);
        let stored = tokio::task::spawn_blocking(move || loader.load_profile(&key))
            .await
            .map_err(|e| EngineError::Task(e.to_string()))??;

        let mut profile = match stored {
            Some(profile) => {
                tracing::info!(
                    profile_id = %profile.id,
                    concepts = profile.concepts.len(),
                    exams = profile.exams.len(),
                    "Mastery profile loaded"
                );
                profile
            }
            None => {
                let profile = MasteryProfile::new();
                tracing::info!(profile_id = %profile.id, "No stored profile, starting fresh");
                profile
            }
        };
        let repaired = profile.repair_scores();
        if repaired > 0 {
            tracing::warn!(
                profile_id = %profile.id,
                repaired,
                "Stored scores outside 0..=5 were repaired on load"
            );
        }
        profile.recompute_schedule(clock.today());

        Ok(Self {
            profile,
            profile_key: config.profile_key.clone(),
            flush_on_write: config.flush_on_write,
            weak_threshold: config.weak_threshold,
            repository,
            clock,
        })
    }

    pub fn profile(&self) -> &MasteryProfile {
        &self.profile
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Records one interaction with the given hint level against every concept,
    /// then persists the whole profile.
    pub async fn record_event<S: AsRef<str>>(
        &mut self,
        concepts: &[S],
        hint_level: HintLevel,
    ) -> Result<&MasteryProfile, EngineError> {
        let today = self.clock.today();
        let updated = self.profile.record_event(concepts, hint_level, today)?;

        tracing::info!(
            profile_id = %self.profile.id,
            concepts = updated,
            hint_level = hint_level.as_i64(),
            %today,
            "Learning event recorded"
        );

        self.persist().await?;
        Ok(&self.profile)
    }

    /// Same as [`record_event`](Self::record_event) for a raw hint level from the hint service.
    pub async fn record_raw_event<S: AsRef<str>>(
        &mut self,
        concepts: &[S],
        hint_level: i64,
    ) -> Result<&MasteryProfile, EngineError> {
        let level = HintLevel::try_from(hint_level)?;
        self.record_event(concepts, level).await
    }

    pub async fn compute_exam_readiness<S: AsRef<str>>(
        &mut self,
        exam_id: &str,
        concept_ids: &[S],
    ) -> Result<ExamReadiness, EngineError> {
        if exam_id.trim().is_empty() {
            return Err(MasteryError::BlankExamId.into());
        }

        let exam = self.profile.compute_exam_readiness(exam_id, concept_ids);
        tracing::info!(
            profile_id = %self.profile.id,
            exam_id,
            readiness = %exam.readiness,
            percentage = exam.percentage,
            "Exam readiness computed"
        );

        self.persist().await?;
        Ok(exam)
    }

    pub fn due_today(&self) -> &[String] {
        self.profile.due_today()
    }

    /// Weak concepts below the configured threshold.
    pub fn weak_concepts(&self) -> Vec<WeakConcept> {
        self.profile.weak_concepts(self.weak_threshold)
    }

    pub fn weak_concepts_below(&self, threshold: f64) -> Vec<WeakConcept> {
        self.profile.weak_concepts(threshold)
    }

    pub fn review_queue(&self) -> Vec<ReviewItem> {
        self.profile.review_queue()
    }

    pub fn summary(&self) -> ProfileSummary {
        self.profile.summary()
    }

    /// Rebuilds the schedule for the clock's current day and persists it.
    pub async fn refresh_schedule(&mut self) -> Result<&MasteryProfile, EngineError> {
        self.profile.recompute_schedule(self.clock.today());
        self.persist().await?;
        Ok(&self.profile)
    }

    /// Replaces the profile with a fresh, empty one. Irreversible.
    pub async fn reset_profile(&mut self) -> Result<&MasteryProfile, EngineError> {
        let previous = std::mem::take(&mut self.profile);
        tracing::info!(
            previous_id = %previous.id,
            profile_id = %self.profile.id,
            "Mastery profile reset"
        );

        self.persist().await?;
        Ok(&self.profile)
    }

    /// Writes the current profile to the repository and waits for completion.
    /// Safe to call again after a failed write.
    pub async fn persist(&self) -> Result<(), EngineError> {
        let repository = Arc::clone(&self.repository);
        let key = self.profile_key.clone();
        let profile = self.profile.clone();
        let flush = self.flush_on_write;

        let result = tokio::task::spawn_blocking(move || {
            repository.save_profile(&key, &profile)?;
            if flush {
                repository.flush()?;
            }
            Ok::<(), StoreError>(())
        })
        .await
        .map_err(|e| EngineError::Task(e.to_string()))?;

        if let Err(e) = result {
            tracing::warn!(
                profile_id = %self.profile.id,
                error = %e,
                "Failed to persist mastery profile, in-memory state kept"
            );
            return Err(e.into());
        }
        Ok(())
    }
}
