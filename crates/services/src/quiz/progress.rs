/// Why asking can no longer succeed this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    BudgetExhausted,
    QuestionsExhausted,
}

/// Aggregated view of round progress, useful for UI.
///
/// `budget_exhausted` and `questions_exhausted` are independent: either can
/// become true first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub questions_used: usize,
    pub budget: u32,
    pub budget_remaining: usize,
    pub questions_remaining: usize,
    pub budget_exhausted: bool,
    pub questions_exhausted: bool,
    pub answer_revealed: bool,
}

impl QuizProgress {
    /// Budget takes precedence when both limits are hit at once.
    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.budget_exhausted {
            Some(StopReason::BudgetExhausted)
        } else if self.questions_exhausted {
            Some(StopReason::QuestionsExhausted)
        } else {
            None
        }
    }
}
