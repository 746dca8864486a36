use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::answer::Answer;
use crate::model::ids::QuestionKey;
use crate::model::term::{TermRule, TermValue};

/// Convergence verdict shown when the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence {
    Convergent { limit: f64 },
    Divergent,
}

impl Convergence {
    #[must_use]
    pub fn is_convergent(self) -> bool {
        matches!(self, Self::Convergent { .. })
    }
}

/// One row of a sequence preview table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewRow {
    pub n: u64,
    pub value: TermValue,
}

/// Immutable catalog entry describing one hidden sequence.
///
/// `properties` holds the authored tri-state answer for each question key.
/// The answers are ground truth; nothing here derives them from `term`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceDefinition {
    name: String,
    formula: String,
    preview_length: u32,
    term: TermRule,
    properties: BTreeMap<QuestionKey, Answer>,
    #[serde(default)]
    limit_value: Option<f64>,
    explanation: String,
}

impl SequenceDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        preview_length: u32,
        term: TermRule,
        properties: BTreeMap<QuestionKey, Answer>,
        limit_value: Option<f64>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            formula: formula.into(),
            preview_length,
            term,
            properties,
            limit_value,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    #[must_use]
    pub fn preview_length(&self) -> u32 {
        self.preview_length
    }

    #[must_use]
    pub fn term_rule(&self) -> TermRule {
        self.term
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<QuestionKey, Answer> {
        &self.properties
    }

    #[must_use]
    pub fn limit_value(&self) -> Option<f64> {
        self.limit_value
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Value of `a_n`.
    #[must_use]
    pub fn term(&self, n: u64) -> TermValue {
        self.term.evaluate(n)
    }

    /// Authored answer for `key`; keys without an entry read as `Undefined`.
    #[must_use]
    pub fn answer_for(&self, key: &str) -> Answer {
        self.properties.get(key).copied().unwrap_or(Answer::Undefined)
    }

    #[must_use]
    pub fn verdict(&self) -> Convergence {
        match self.limit_value {
            Some(limit) => Convergence::Convergent { limit },
            None => Convergence::Divergent,
        }
    }

    /// Terms `a_1 ..= a_preview_length`, with undefined points kept as gaps.
    #[must_use]
    pub fn preview(&self) -> Vec<PreviewRow> {
        (1..=u64::from(self.preview_length))
            .map(|n| PreviewRow {
                n,
                value: self.term(n),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reciprocal() -> SequenceDefinition {
        let mut properties = BTreeMap::new();
        properties.insert(QuestionKey::new("convergent").unwrap(), Answer::Yes);
        properties.insert(QuestionKey::new("n_times_conv").unwrap(), Answer::Undefined);
        SequenceDefinition::new(
            "1/n",
            "a_n = 1/n",
            5,
            TermRule::Reciprocal,
            properties,
            Some(0.0),
            "decreases to 0",
        )
    }

    #[test]
    fn preview_covers_one_through_preview_length() {
        let rows = reciprocal().preview();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].n, 1);
        assert_eq!(rows[4].n, 5);
        assert_eq!(rows[1].value, TermValue::Defined(0.5));
    }

    #[test]
    fn answers_keep_undefined_distinct() {
        let seq = reciprocal();
        assert_eq!(seq.answer_for("convergent"), Answer::Yes);
        assert_eq!(seq.answer_for("n_times_conv"), Answer::Undefined);
        assert_eq!(seq.answer_for("missing"), Answer::Undefined);
    }

    #[test]
    fn verdict_follows_limit_value() {
        assert_eq!(reciprocal().verdict(), Convergence::Convergent { limit: 0.0 });

        let divergent = SequenceDefinition::new(
            "n",
            "a_n = n",
            3,
            TermRule::Identity,
            BTreeMap::new(),
            None,
            "grows without bound",
        );
        assert!(!divergent.verdict().is_convergent());
    }
}
