use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, NEEDS_WORK_PERCENTAGE, READY_PERCENTAGE};

use super::label::format_concept_label;
use super::types::{ExamReadiness, MasteryBand, MasteryProfile, Readiness};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakConcept {
    pub concept: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewUrgency {
    DueToday,
    DueSoon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub concept: String,
    pub label: String,
    pub score: f64,
    pub urgency: ReviewUrgency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSummary {
    pub concept: String,
    pub label: String,
    pub score: f64,
    pub percentage: f64,
    pub band: MasteryBand,
    pub due_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub exam: String,
    pub readiness: Readiness,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub concepts: Vec<ConceptSummary>,
    pub exams: Vec<ExamSummary>,
}

pub fn classify_readiness(percentage: f64) -> Readiness {
    if percentage >= READY_PERCENTAGE {
        Readiness::Ready
    } else if percentage >= NEEDS_WORK_PERCENTAGE {
        Readiness::NeedsWork
    } else {
        Readiness::NotReady
    }
}

pub fn score_percentage(score: f64) -> f64 {
    score / MAX_SCORE * 100.0
}

impl MasteryProfile {
    /// Average score over the listed concepts that have been attempted.
    /// Unknown concepts are skipped; with none known the average is zero.
    pub fn average_score<S: AsRef<str>>(&self, concept_ids: &[S]) -> f64 {
        let (total, count) = concept_ids
            .iter()
            .filter_map(|id| self.concepts.get(id.as_ref()))
            .fold((0.0, 0_u32), |(total, count), c| (total + c.score, count + 1));

        if count > 0 {
            total / f64::from(count)
        } else {
            0.0
        }
    }

    /// Computes readiness for `exam_id` and stores it, replacing any earlier result.
    pub fn compute_exam_readiness<S: AsRef<str>>(
        &mut self,
        exam_id: &str,
        concept_ids: &[S],
    ) -> ExamReadiness {
        let percentage = score_percentage(self.average_score(concept_ids));

        let exam = ExamReadiness {
            concepts: concept_ids.iter().map(|c| c.as_ref().to_string()).collect(),
            readiness: classify_readiness(percentage),
            percentage: percentage.round().clamp(0.0, 100.0) as u8,
        };

        self.exams.insert(exam_id.to_string(), exam.clone());
        exam
    }

    /// Concepts scoring strictly below `threshold`, weakest first.
    pub fn weak_concepts(&self, threshold: f64) -> Vec<WeakConcept> {
        let mut weak: Vec<WeakConcept> = self
            .concepts
            .iter()
            .filter(|(_, c)| c.score < threshold)
            .map(|(id, c)| WeakConcept {
                concept: id.clone(),
                score: c.score,
            })
            .collect();

        // sort_by is stable, so equal scores keep insertion order
        weak.sort_by(|a, b| a.score.total_cmp(&b.score));
        weak
    }

    /// Concepts due today, then concepts due within 24h.
    pub fn review_queue(&self) -> Vec<ReviewItem> {
        let due_today = self
            .schedule
            .due_today
            .iter()
            .map(|id| (id, ReviewUrgency::DueToday));
        let due_soon = self
            .schedule
            .due_within_24h
            .iter()
            .map(|id| (id, ReviewUrgency::DueSoon));

        due_today
            .chain(due_soon)
            .map(|(id, urgency)| ReviewItem {
                concept: id.clone(),
                label: format_concept_label(id),
                score: self.concepts.get(id).map(|c| c.score).unwrap_or(0.0),
                urgency,
            })
            .collect()
    }

    pub fn summary(&self) -> ProfileSummary {
        let mut concepts: Vec<ConceptSummary> = self
            .concepts
            .iter()
            .map(|(id, c)| ConceptSummary {
                concept: id.clone(),
                label: format_concept_label(id),
                score: c.score,
                percentage: score_percentage(c.score),
                band: c.band(),
                due_today: self.schedule.due_today.contains(id),
            })
            .collect();
        concepts.sort_by(|a, b| a.score.total_cmp(&b.score));

        let exams = self
            .exams
            .iter()
            .map(|(exam, readiness)| ExamSummary {
                exam: exam.clone(),
                readiness: readiness.readiness,
                percentage: readiness.percentage,
            })
            .collect();

        ProfileSummary { concepts, exams }
    }
}
