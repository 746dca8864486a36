use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::answer::Answer;
use crate::model::question::{Question, QuestionCatalog};
use crate::model::sequence::SequenceDefinition;

/// Longest preview a catalog entry may request.
pub const MAX_PREVIEW_LENGTH: u32 = 1_000;

/// Question whose answer must agree with the presence of a limit value.
const CONVERGENT_KEY: &str = "convergent";

/// Read-only reference data for the guessing game.
///
/// Built once at startup and shared between sessions. Construction checks that
/// every sequence answers every question in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizCatalog {
    questions: QuestionCatalog,
    sequences: Vec<SequenceDefinition>,
}

#[derive(Deserialize)]
struct RawCatalog {
    questions: QuestionCatalog,
    sequences: Vec<SequenceDefinition>,
}

impl QuizCatalog {
    /// Validates and assembles a catalog.
    ///
    /// An empty sequence list is accepted here; starting a round reports it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a sequence is missing an answer, answers an
    /// unknown question, has a non-finite limit, previews zero or too many
    /// terms, or has a limit value that contradicts its `convergent` answer.
    pub fn new(
        questions: QuestionCatalog,
        sequences: Vec<SequenceDefinition>,
    ) -> Result<Self, CatalogError> {
        for sequence in &sequences {
            validate_sequence(&questions, sequence)?;
        }
        Ok(Self {
            questions,
            sequences,
        })
    }

    /// Loads a catalog authored as JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed input and any validation error
    /// from [`QuizCatalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        Self::new(raw.questions, raw.sequences)
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    #[must_use]
    pub fn sequences(&self) -> &[SequenceDefinition] {
        &self.sequences
    }

    #[must_use]
    pub fn sequence(&self, index: usize) -> Option<&SequenceDefinition> {
        self.sequences.get(index)
    }

    #[must_use]
    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions.get(key)
    }
}

fn validate_sequence(
    questions: &QuestionCatalog,
    sequence: &SequenceDefinition,
) -> Result<(), CatalogError> {
    if sequence.preview_length() == 0 {
        return Err(CatalogError::EmptyPreview {
            sequence: sequence.name().to_owned(),
        });
    }
    if sequence.preview_length() > MAX_PREVIEW_LENGTH {
        return Err(CatalogError::PreviewTooLong {
            sequence: sequence.name().to_owned(),
            max: MAX_PREVIEW_LENGTH,
        });
    }
    if sequence.limit_value().is_some_and(|limit| !limit.is_finite()) {
        return Err(CatalogError::NonFiniteLimit {
            sequence: sequence.name().to_owned(),
        });
    }
    if let Some(key) = questions
        .keys()
        .find(|key| !sequence.properties().contains_key(key.as_str()))
    {
        return Err(CatalogError::MissingProperty {
            sequence: sequence.name().to_owned(),
            key: key.to_string(),
        });
    }
    if let Some(key) = sequence
        .properties()
        .keys()
        .find(|key| !questions.contains(key.as_str()))
    {
        return Err(CatalogError::UnknownProperty {
            sequence: sequence.name().to_owned(),
            key: key.to_string(),
        });
    }
    // A limit is authored only for convergent sequences.
    if questions.contains(CONVERGENT_KEY)
        && sequence.limit_value().is_some() != (sequence.answer_for(CONVERGENT_KEY) == Answer::Yes)
    {
        return Err(CatalogError::LimitMismatch {
            sequence: sequence.name().to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TermRule;

    const TWO_QUESTIONS: &str = r#"{
        "questions": [
            {"key": "convergent", "prompt": "Does it converge?"},
            {"key": "bounded", "prompt": "Is it bounded?"}
        ],
        "sequences": [
            {
                "name": "1/n",
                "formula": "a_n = 1/n",
                "preview_length": 10,
                "term": {"kind": "reciprocal"},
                "properties": {"convergent": true, "bounded": true},
                "limit_value": 0.0,
                "explanation": "decreases to 0"
            },
            {
                "name": "(-1)^n",
                "formula": "a_n = (-1)^n",
                "preview_length": 10,
                "term": {"kind": "alternating_sign"},
                "properties": {"convergent": false, "bounded": null},
                "explanation": "oscillates"
            }
        ]
    }"#;

    #[test]
    fn json_catalog_loads_with_tri_state_properties() {
        let catalog = QuizCatalog::from_json(TWO_QUESTIONS).unwrap();
        assert_eq!(catalog.questions().len(), 2);
        assert_eq!(catalog.sequences().len(), 2);

        let oscillating = catalog.sequence(1).unwrap();
        assert_eq!(oscillating.term_rule(), TermRule::AlternatingSign);
        assert_eq!(oscillating.answer_for("bounded"), Answer::Undefined);
        assert_eq!(oscillating.limit_value(), None);
    }

    #[test]
    fn missing_property_is_rejected() {
        let raw = TWO_QUESTIONS.replace(r#""bounded": null"#, r#""extra_key_absent": null"#);
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingProperty { ref sequence, ref key }
                if sequence == "(-1)^n" && key == "bounded"
        ));
    }

    #[test]
    fn unknown_property_is_rejected() {
        let raw = TWO_QUESTIONS.replace(
            r#""convergent": false, "bounded": null"#,
            r#""convergent": false, "bounded": null, "monotone": false"#,
        );
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProperty { ref key, .. } if key == "monotone"));
    }

    #[test]
    fn duplicate_question_keys_fail_to_parse() {
        let raw = TWO_QUESTIONS.replace(r#""key": "bounded""#, r#""key": "convergent""#);
        assert!(QuizCatalog::from_json(&raw).is_err());
    }

    #[test]
    fn malformed_json_maps_to_parse_error() {
        let err = QuizCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn zero_preview_is_rejected() {
        let raw = TWO_QUESTIONS.replacen(r#""preview_length": 10"#, r#""preview_length": 0"#, 1);
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyPreview { ref sequence } if sequence == "1/n"));
    }

    #[test]
    fn limit_on_non_convergent_sequence_is_rejected() {
        let raw = TWO_QUESTIONS.replace(
            r#""explanation": "oscillates""#,
            r#""limit_value": 3.0, "explanation": "oscillates""#,
        );
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::LimitMismatch { ref sequence } if sequence == "(-1)^n"));
    }

    #[test]
    fn convergent_sequence_without_limit_is_rejected() {
        let raw = TWO_QUESTIONS.replace(r#""limit_value": 0.0,"#, "");
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::LimitMismatch { ref sequence } if sequence == "1/n"));
    }

    #[test]
    fn limit_is_unchecked_without_a_convergent_question() {
        let raw = r#"{
            "questions": [{"key": "bounded", "prompt": "Is it bounded?"}],
            "sequences": [{
                "name": "n",
                "formula": "a_n = n",
                "preview_length": 5,
                "term": {"kind": "identity"},
                "properties": {"bounded": false},
                "limit_value": 3.0,
                "explanation": "authored as-is"
            }]
        }"#;
        assert!(QuizCatalog::from_json(raw).is_ok());
    }

    #[test]
    fn oversized_preview_is_rejected() {
        let raw = TWO_QUESTIONS.replacen(
            r#""preview_length": 10"#,
            r#""preview_length": 4294967295"#,
            1,
        );
        let err = QuizCatalog::from_json(&raw).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PreviewTooLong { ref sequence, max }
                if sequence == "1/n" && max == MAX_PREVIEW_LENGTH
        ));
    }

    #[test]
    fn empty_sequence_list_is_allowed() {
        let catalog = QuizCatalog::new(QuestionCatalog::new(Vec::new()).unwrap(), Vec::new()).unwrap();
        assert!(catalog.sequences().is_empty());
    }
}
