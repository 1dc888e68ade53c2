use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DAILY_INTERVAL_DAYS, DAILY_REVIEW_MAX_SCORE, FREQUENT_INTERVAL_DAYS,
    FREQUENT_REVIEW_MAX_SCORE, WEEKLY_INTERVAL_DAYS, WEEK_LOOKAHEAD_DAYS,
};

use super::types::{ConceptMastery, MasteryProfile, SpacedSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewBucket {
    DueToday,
    DueWithin24h,
    DueWithinWeek,
}

/// Lower scores get shorter intervals.
pub fn review_interval_days(score: f64) -> i64 {
    if score <= DAILY_REVIEW_MAX_SCORE {
        DAILY_INTERVAL_DAYS
    } else if score <= FREQUENT_REVIEW_MAX_SCORE {
        FREQUENT_INTERVAL_DAYS
    } else {
        WEEKLY_INTERVAL_DAYS
    }
}

/// Whole days elapsed since the last review. Negative when the review date lies after `today`.
pub fn days_since_review(last_review: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_review).num_days()
}

/// First matching test wins; `None` means the concept is not scheduled yet.
///
/// With a one-day interval the due-within-24h test is `days >= 0`, so a daily-review
/// concept is always either due today or due within 24h and never unscheduled.
pub fn classify(days_since: i64, interval: i64) -> Option<ReviewBucket> {
    if days_since >= interval {
        Some(ReviewBucket::DueToday)
    } else if days_since >= interval - 1 {
        Some(ReviewBucket::DueWithin24h)
    } else if days_since >= interval - WEEK_LOOKAHEAD_DAYS {
        Some(ReviewBucket::DueWithinWeek)
    } else {
        None
    }
}

pub fn classify_concept(concept: &ConceptMastery, today: NaiveDate) -> Option<ReviewBucket> {
    classify(
        days_since_review(concept.last_review_date, today),
        review_interval_days(concept.score),
    )
}

pub fn build_schedule(profile: &MasteryProfile, today: NaiveDate) -> SpacedSchedule {
    let mut schedule = SpacedSchedule::default();

    for (concept_id, concept) in &profile.concepts {
        match classify_concept(concept, today) {
            Some(ReviewBucket::DueToday) => schedule.due_today.push(concept_id.clone()),
            Some(ReviewBucket::DueWithin24h) => schedule.due_within_24h.push(concept_id.clone()),
            Some(ReviewBucket::DueWithinWeek) => {
                schedule.due_within_week.push(concept_id.clone())
            }
            None => {}
        }
    }

    schedule
}

impl MasteryProfile {
    /// Rebuilds the schedule from scratch for `today`.
    pub fn recompute_schedule(&mut self, today: NaiveDate) {
        self.schedule = build_schedule(self, today);
        tracing::debug!(
            due_today = self.schedule.due_today.len(),
            due_within_24h = self.schedule.due_within_24h.len(),
            due_within_week = self.schedule.due_within_week.len(),
            "Schedule recomputed"
        );
    }

    pub fn due_today(&self) -> &[String] {
        &self.schedule.due_today
    }
}
