use chrono::{DateTime, Utc};

use quiz_core::model::{Answer, Convergence, Question, SequenceDefinition};

/// Everything shown once the hidden sequence is revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal<'a> {
    pub sequence: &'a SequenceDefinition,
    pub verdict: Convergence,
    /// Every catalog question with the sequence's authored answer, in catalog order.
    pub properties: Vec<(&'a Question, Answer)>,
    pub revealed_at: DateTime<Utc>,
}

impl Reveal<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.sequence.name()
    }

    #[must_use]
    pub fn formula(&self) -> &str {
        self.sequence.formula()
    }

    #[must_use]
    pub fn limit_value(&self) -> Option<f64> {
        self.sequence.limit_value()
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        self.sequence.explanation()
    }
}
