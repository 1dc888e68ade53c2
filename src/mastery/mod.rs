pub mod clock;
pub mod engine;
pub mod label;
pub mod readiness;
pub mod schedule;
pub mod scoring;
pub mod types;

use thiserror::Error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{EngineError, MasteryEngine};
pub use types::*;

/// Rejected learning-event input. Raised before anything is mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MasteryError {
    #[error("event must reference at least one concept")]
    EmptyConcepts,
    #[error("event references {0} concepts, more than the {max} allowed", max = crate::constants::MAX_CONCEPTS_PER_EVENT)]
    TooManyConcepts(usize),
    #[error("concept identifiers must not be blank")]
    BlankConceptId,
    #[error("hint level {0} is outside 0..=3")]
    InvalidHintLevel(i64),
    #[error("exam identifier must not be blank")]
    BlankExamId,
}
