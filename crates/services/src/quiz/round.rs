use chrono::{DateTime, Utc};

use quiz_core::model::{Answer, QuestionKey, RoundId};

/// One entry of the round log: a question and the answer it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedQuestion {
    pub key: QuestionKey,
    pub answer: Answer,
}

/// State of a single guessing round.
///
/// `asked` is kept in the order questions were asked and never holds a key
/// twice, so its length is the number of questions used.
#[derive(Debug, Clone)]
pub(crate) struct Round {
    pub(crate) id: RoundId,
    pub(crate) sequence_index: usize,
    pub(crate) asked: Vec<AskedQuestion>,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) revealed_at: Option<DateTime<Utc>>,
}

impl Round {
    pub(crate) fn new(sequence_index: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            id: RoundId::generate(),
            sequence_index,
            asked: Vec::new(),
            started_at,
            revealed_at: None,
        }
    }

    pub(crate) fn has_asked(&self, key: &str) -> bool {
        self.asked.iter().any(|entry| entry.key.as_str() == key)
    }

    pub(crate) fn answer_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }
}
