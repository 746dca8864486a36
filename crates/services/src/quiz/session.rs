use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{
    Answer, Question, QuestionBudget, QuizCatalog, RoundId, SequenceDefinition,
};

use super::progress::{QuizProgress, StopReason};
use super::reveal::Reveal;
use super::round::{AskedQuestion, Round};
use crate::error::QuizError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's guessing game.
///
/// Holds at most one active round over a shared, read-only catalog. Each
/// operation either applies completely or returns an error and leaves the
/// session as it was.
pub struct QuizSession {
    catalog: Arc<QuizCatalog>,
    budget: QuestionBudget,
    clock: Clock,
    rng: StdRng,
    round: Option<Round>,
}

impl QuizSession {
    /// Creates a session with an OS-seeded random source and no active round.
    #[must_use]
    pub fn new(catalog: Arc<QuizCatalog>, budget: QuestionBudget) -> Self {
        Self::with_rng(catalog, budget, StdRng::from_os_rng())
    }

    /// Creates a session whose sequence picks are reproducible.
    #[must_use]
    pub fn with_seed(catalog: Arc<QuizCatalog>, budget: QuestionBudget, seed: u64) -> Self {
        Self::with_rng(catalog, budget, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<QuizCatalog>, budget: QuestionBudget, rng: StdRng) -> Self {
        Self {
            catalog,
            budget,
            clock: Clock::default(),
            rng,
            round: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn budget(&self) -> QuestionBudget {
        self.budget
    }

    #[must_use]
    pub fn is_round_active(&self) -> bool {
        self.round.is_some()
    }

    #[must_use]
    pub fn round_id(&self) -> Option<RoundId> {
        self.round.as_ref().map(|round| round.id)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.round.as_ref().map(|round| round.started_at)
    }

    /// The hidden sequence of the active round.
    #[must_use]
    pub fn active_sequence(&self) -> Option<&SequenceDefinition> {
        self.round
            .as_ref()
            .and_then(|round| self.catalog.sequence(round.sequence_index))
    }

    /// Questions asked this round, in the order they were asked.
    #[must_use]
    pub fn asked(&self) -> &[AskedQuestion] {
        self.round
            .as_ref()
            .map(|round| round.asked.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn questions_used(&self) -> usize {
        self.asked().len()
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.round.as_ref().is_some_and(Round::answer_revealed)
    }

    /// Starts a new round on a uniformly chosen sequence.
    ///
    /// Any previous round is discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyCatalog` if the catalog has no sequences.
    pub fn start_round(&mut self) -> Result<&SequenceDefinition, QuizError> {
        let count = self.catalog.sequences().len();
        if count == 0 {
            warn!("cannot start a round: sequence catalog is empty");
            return Err(QuizError::EmptyCatalog);
        }

        let sequence_index = self.rng.random_range(0..count);
        let round = Round::new(sequence_index, self.clock.now());
        info!(round_id = %round.id, sequence_index, "started quiz round");
        self.round = Some(round);

        self.active_sequence().ok_or(QuizError::NoActiveRound)
    }

    /// Same contract as [`QuizSession::start_round`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyCatalog` if the catalog has no sequences.
    pub fn reset_session(&mut self) -> Result<&SequenceDefinition, QuizError> {
        self.start_round()
    }

    /// Asks a yes/no question about the hidden sequence.
    ///
    /// Checks run in this order: active round, budget, known key, not yet asked.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveRound`, `QuizError::BudgetExhausted`,
    /// `QuizError::UnknownQuestionKey` or `QuizError::AlreadyAsked`.
    pub fn ask_question(&mut self, key: &str) -> Result<Answer, QuizError> {
        let budget = self.budget;
        let round = self.round.as_mut().ok_or(QuizError::NoActiveRound)?;

        if budget.is_exhausted(round.asked.len()) {
            return Err(QuizError::BudgetExhausted {
                budget: budget.limit(),
            });
        }

        let Some(question) = self.catalog.question(key) else {
            return Err(QuizError::UnknownQuestionKey {
                key: key.to_owned(),
            });
        };

        if round.has_asked(key) {
            return Err(QuizError::AlreadyAsked {
                key: question.key().clone(),
            });
        }

        let sequence = self
            .catalog
            .sequence(round.sequence_index)
            .ok_or(QuizError::NoActiveRound)?;
        let answer = sequence.answer_for(key);

        round.asked.push(AskedQuestion {
            key: question.key().clone(),
            answer,
        });
        debug!(
            round_id = %round.id,
            question = %question.key(),
            used = round.asked.len(),
            "question answered"
        );

        Ok(answer)
    }

    /// Catalog questions not yet asked this round, in catalog order.
    ///
    /// An empty list means every question was asked; it says nothing about
    /// the budget.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveRound` before the first round.
    pub fn remaining_questions(&self) -> Result<Vec<&Question>, QuizError> {
        let round = self.round.as_ref().ok_or(QuizError::NoActiveRound)?;
        Ok(self
            .catalog
            .questions()
            .iter()
            .filter(|question| !round.has_asked(question.key().as_str()))
            .collect())
    }

    /// Reveals the hidden sequence. Repeated calls change nothing.
    ///
    /// Revealing does not end the round; questions may still be asked.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveRound` before the first round.
    pub fn reveal_answer(&mut self) -> Result<Reveal<'_>, QuizError> {
        let now = self.clock.now();
        let round = self.round.as_mut().ok_or(QuizError::NoActiveRound)?;
        if round.revealed_at.is_none() {
            round.revealed_at = Some(now);
            info!(
                round_id = %round.id,
                questions_used = round.asked.len(),
                "answer revealed"
            );
        }
        let revealed_at = round.revealed_at.unwrap_or(now);
        let sequence_index = round.sequence_index;

        let catalog: &QuizCatalog = &self.catalog;
        let sequence = catalog
            .sequence(sequence_index)
            .ok_or(QuizError::NoActiveRound)?;
        let properties = catalog
            .questions()
            .iter()
            .map(|question| (question, sequence.answer_for(question.key().as_str())))
            .collect();

        Ok(Reveal {
            sequence,
            verdict: sequence.verdict(),
            properties,
            revealed_at,
        })
    }

    /// Returns a summary of the current round, or `None` before the first round.
    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        let round = self.round.as_ref()?;
        let used = round.asked.len();
        let questions_remaining = self.catalog.questions().len().saturating_sub(used);
        Some(QuizProgress {
            questions_used: used,
            budget: self.budget.limit(),
            budget_remaining: self.budget.remaining(used),
            questions_remaining,
            budget_exhausted: self.budget.is_exhausted(used),
            questions_exhausted: questions_remaining == 0,
            answer_revealed: round.answer_revealed(),
        })
    }

    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.progress().as_ref().and_then(QuizProgress::stop_reason)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("budget", &self.budget)
            .field("sequences_len", &self.catalog.sequences().len())
            .field("questions_len", &self.catalog.questions().len())
            .field("round_id", &self.round_id())
            .field("questions_used", &self.questions_used())
            .field("answer_revealed", &self.answer_revealed())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
