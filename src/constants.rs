/// Lowest reachable mastery score
pub const MIN_SCORE: f64 = 0.0;

/// Highest reachable mastery score
pub const MAX_SCORE: f64 = 5.0;

/// Score given to a concept the first time an event references it
pub const INITIAL_SCORE: f64 = 2.5;

/// Score deltas per hint level
pub const MINIMAL_HINT_DELTA: f64 = 0.5;
pub const MODERATE_HINT_DELTA: f64 = -0.3;
pub const FULL_EXPLANATION_DELTA: f64 = -0.8;

/// Scores at or below this are reviewed daily
pub const DAILY_REVIEW_MAX_SCORE: f64 = 2.0;

/// Scores at or below this (and above the daily bound) are reviewed every few days
pub const FREQUENT_REVIEW_MAX_SCORE: f64 = 3.5;

/// Review intervals in days
pub const DAILY_INTERVAL_DAYS: i64 = 1;
pub const FREQUENT_INTERVAL_DAYS: i64 = 3;
pub const WEEKLY_INTERVAL_DAYS: i64 = 7;

/// A concept enters the due-within-a-week list this many days before it is due
pub const WEEK_LOOKAHEAD_DAYS: i64 = 3;

/// Exam readiness percentage thresholds
pub const READY_PERCENTAGE: f64 = 80.0;
pub const NEEDS_WORK_PERCENTAGE: f64 = 60.0;

/// Default cut-off for weak-concept queries
pub const DEFAULT_WEAK_THRESHOLD: f64 = 3.0;

/// Display band cut-offs
pub const HIGH_BAND_MIN_SCORE: f64 = 4.0;
pub const MEDIUM_BAND_MIN_SCORE: f64 = 2.5;

/// Key under which the profile blob is stored when none is configured
pub const DEFAULT_PROFILE_KEY: &str = "masteryProfile";

/// Upper bound on store key length in bytes
pub const MAX_KEY_LEN: usize = 128;

/// Upper bound on concepts accepted in a single event
pub const MAX_CONCEPTS_PER_EVENT: usize = 256;
