use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CatalogError;
use crate::model::ids::QuestionKey;

/// A yes/no question the learner may ask about the hidden sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    key: QuestionKey,
    prompt: String,
}

impl Question {
    #[must_use]
    pub fn new(key: QuestionKey, prompt: impl Into<String>) -> Self {
        Self {
            key,
            prompt: prompt.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &QuestionKey {
        &self.key
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Ordered, read-only list of questions with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateQuestionKey` if a key appears twice.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.key.as_str()) {
                return Err(CatalogError::DuplicateQuestionKey(
                    question.key.as_str().to_owned(),
                ));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key.as_str() == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &QuestionKey> {
        self.questions.iter().map(Question::key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl TryFrom<Vec<Question>> for QuestionCatalog {
    type Error = CatalogError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionCatalog> for Vec<Question> {
    fn from(catalog: QuestionCatalog) -> Self {
        catalog.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(key: &str) -> Question {
        Question::new(QuestionKey::new(key).unwrap(), format!("Is it {key}?"))
    }

    #[test]
    fn catalog_keeps_authored_order() {
        let catalog =
            QuestionCatalog::new(vec![question("convergent"), question("bounded")]).unwrap();
        let keys: Vec<_> = catalog.keys().map(QuestionKey::as_str).collect();
        assert_eq!(keys, vec!["convergent", "bounded"]);
        assert!(catalog.contains("bounded"));
        assert!(!catalog.contains("monotone"));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = QuestionCatalog::new(vec![question("bounded"), question("bounded")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateQuestionKey(key) if key == "bounded"));
    }
}
