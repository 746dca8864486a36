use std::fmt;

use crate::error::CatalogError;

/// Maximum number of distinct questions a learner may ask in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuestionBudget(u32);

impl QuestionBudget {
    pub const DEFAULT: Self = Self(8);

    /// # Errors
    ///
    /// Returns `CatalogError::InvalidBudget` if `limit` is zero.
    pub fn new(limit: u32) -> Result<Self, CatalogError> {
        if limit == 0 {
            return Err(CatalogError::InvalidBudget);
        }
        Ok(Self(limit))
    }

    #[must_use]
    pub fn limit(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    /// Questions still allowed after `used` have been asked.
    #[must_use]
    pub fn remaining(self, used: usize) -> usize {
        self.as_usize().saturating_sub(used)
    }

    #[must_use]
    pub fn is_exhausted(self, used: usize) -> bool {
        used >= self.as_usize()
    }
}

impl Default for QuestionBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for QuestionBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_eight() {
        assert_eq!(QuestionBudget::default().limit(), 8);
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(matches!(QuestionBudget::new(0), Err(CatalogError::InvalidBudget)));
    }

    #[test]
    fn remaining_saturates() {
        let budget = QuestionBudget::new(2).unwrap();
        assert_eq!(budget.remaining(1), 1);
        assert_eq!(budget.remaining(5), 0);
        assert!(!budget.is_exhausted(1));
        assert!(budget.is_exhausted(2));
    }
}
