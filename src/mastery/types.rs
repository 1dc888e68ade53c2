use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FULL_EXPLANATION_DELTA, HIGH_BAND_MIN_SCORE, INITIAL_SCORE, MEDIUM_BAND_MIN_SCORE,
    MINIMAL_HINT_DELTA, MODERATE_HINT_DELTA,
};

use super::MasteryError;

/// How much help the learner needed for one interaction.
///
/// Serialized as the bare integer the hint service uses (0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum HintLevel {
    /// "I understood it" acknowledgment, no hint consumed
    Acknowledged,
    Minimal,
    Moderate,
    FullExplanation,
}

impl HintLevel {
    pub fn as_i64(self) -> i64 {
        match self {
            HintLevel::Acknowledged => 0,
            HintLevel::Minimal => 1,
            HintLevel::Moderate => 2,
            HintLevel::FullExplanation => 3,
        }
    }

    pub fn score_delta(self) -> f64 {
        match self {
            HintLevel::Acknowledged => 0.0,
            HintLevel::Minimal => MINIMAL_HINT_DELTA,
            HintLevel::Moderate => MODERATE_HINT_DELTA,
            HintLevel::FullExplanation => FULL_EXPLANATION_DELTA,
        }
    }

    /// Moderate hints and full explanations count as hint usage.
    pub fn counts_as_hint_usage(self) -> bool {
        matches!(self, HintLevel::Moderate | HintLevel::FullExplanation)
    }
}

impl TryFrom<i64> for HintLevel {
    type Error = MasteryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HintLevel::Acknowledged),
            1 => Ok(HintLevel::Minimal),
            2 => Ok(HintLevel::Moderate),
            3 => Ok(HintLevel::FullExplanation),
            other => Err(MasteryError::InvalidHintLevel(other)),
        }
    }
}

impl From<HintLevel> for i64 {
    fn from(level: HintLevel) -> Self {
        level.as_i64()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMastery {
    pub score: f64,
    pub attempts: u32,
    pub hint_usage_count: u32,
    pub last_review_date: NaiveDate,
    pub last_hint_level: HintLevel,
}

impl ConceptMastery {
    pub fn new(hint_level: HintLevel, today: NaiveDate) -> Self {
        Self {
            score: INITIAL_SCORE,
            attempts: 0,
            hint_usage_count: 0,
            last_review_date: today,
            last_hint_level: hint_level,
        }
    }

    pub fn band(&self) -> MasteryBand {
        MasteryBand::from_score(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "Needs Work")]
    NeedsWork,
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Readiness::Ready => "Ready",
            Readiness::NeedsWork => "Needs Work",
            Readiness::NotReady => "Not Ready",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReadiness {
    pub concepts: Vec<String>,
    pub readiness: Readiness,
    pub percentage: u8,
}

/// Review buckets derived from every tracked concept. Holds no state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedSchedule {
    pub due_today: Vec<String>,
    pub due_within_24h: Vec<String>,
    pub due_within_week: Vec<String>,
}

impl SpacedSchedule {
    pub fn is_empty(&self) -> bool {
        self.due_today.is_empty() && self.due_within_24h.is_empty() && self.due_within_week.is_empty()
    }
}

/// Aggregate root: everything persisted for one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryProfile {
    pub id: String,
    #[serde(default)]
    pub concepts: IndexMap<String, ConceptMastery>,
    #[serde(default)]
    pub exams: IndexMap<String, ExamReadiness>,
    #[serde(default)]
    pub schedule: SpacedSchedule,
}

impl MasteryProfile {
    pub fn new() -> Self {
        Self {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            concepts: IndexMap::new(),
            exams: IndexMap::new(),
            schedule: SpacedSchedule::default(),
        }
    }

    pub fn concept(&self, concept_id: &str) -> Option<&ConceptMastery> {
        self.concepts.get(concept_id)
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.exams.is_empty()
    }
}

impl Default for MasteryProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Display band used by the host UI for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryBand {
    Low,
    Medium,
    High,
}

impl MasteryBand {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_BAND_MIN_SCORE {
            MasteryBand::High
        } else if score >= MEDIUM_BAND_MIN_SCORE {
            MasteryBand::Medium
        } else {
            MasteryBand::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_level_accepts_zero_through_three() {
        for raw in 0..=3 {
            let level = HintLevel::try_from(raw).unwrap();
            assert_eq!(level.as_i64(), raw);
        }
        assert!(matches!(
            HintLevel::try_from(4),
            Err(MasteryError::InvalidHintLevel(4))
        ));
        assert!(HintLevel::try_from(-1).is_err());
    }

    #[test]
    fn hint_level_serializes_as_integer() {
        let json = serde_json::to_string(&HintLevel::Moderate).unwrap();
        assert_eq!(json, "2");
        let parsed: HintLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, HintLevel::FullExplanation);
        assert!(serde_json::from_str::<HintLevel>("7").is_err());
    }

    #[test]
    fn readiness_uses_display_labels_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Readiness::NeedsWork).unwrap(),
            "\"Needs Work\""
        );
        assert_eq!(Readiness::NotReady.to_string(), "Not Ready");
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(MasteryBand::from_score(4.0), MasteryBand::High);
        assert_eq!(MasteryBand::from_score(3.99), MasteryBand::Medium);
        assert_eq!(MasteryBand::from_score(2.5), MasteryBand::Medium);
        assert_eq!(MasteryBand::from_score(2.49), MasteryBand::Low);
    }

    #[test]
    fn fresh_profiles_get_distinct_ids() {
        let a = MasteryProfile::new();
        let b = MasteryProfile::new();
        assert!(a.id.starts_with("user_"));
        assert_ne!(a.id, b.id);
        assert!(a.is_empty());
        assert!(a.schedule.is_empty());
    }

    #[test]
    fn concept_dates_serialize_without_time() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let concept = ConceptMastery::new(HintLevel::Minimal, date);
        let value = serde_json::to_value(&concept).unwrap();
        assert_eq!(value["lastReviewDate"], "2024-03-09");
        assert_eq!(value["lastHintLevel"], 1);
        assert_eq!(value["hintUsageCount"], 0);
    }
}
