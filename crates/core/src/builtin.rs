//! Built-in sequence and question catalogs.
//!
//! Two authored variants of the same six sequences. The property tables are
//! reproduced exactly as authored, including places where the variants
//! disagree (for example `n_times_conv` for `1/n`, or the `Undefined`
//! entries in the classic table).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;
use crate::model::{
    Answer, Question, QuestionCatalog, QuestionKey, QuizCatalog, SequenceDefinition, TermRule,
};

const T: Option<bool> = Some(true);
const F: Option<bool> = Some(false);
const U: Option<bool> = None;

/// Which authored catalog to play with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogVariant {
    /// Seven questions about the sequence itself.
    Classic,
    /// Ten questions, adding subsequences and the product with `1/n`.
    #[default]
    Extended,
}

impl CatalogVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Extended => "extended",
        }
    }

    /// Builds the catalog for this variant.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the built-in tables are inconsistent.
    pub fn build(self) -> Result<QuizCatalog, CatalogError> {
        match self {
            Self::Classic => assemble(CLASSIC_QUESTIONS, &CLASSIC_ANSWERS),
            Self::Extended => assemble(EXTENDED_QUESTIONS, &EXTENDED_ANSWERS),
        }
    }
}

impl FromStr for CatalogVariant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "extended" => Ok(Self::Extended),
            _ => Err(CatalogError::UnknownVariant(s.to_owned())),
        }
    }
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SEQUENCES ─────────────────────────────────────────────────────────────────
//

struct SequenceSeed {
    name: &'static str,
    formula: &'static str,
    preview_length: u32,
    term: TermRule,
    limit_value: Option<f64>,
    explanation: &'static str,
}

const SEQUENCES: [SequenceSeed; 6] = [
    SequenceSeed {
        name: "1/n",
        formula: "a_n = 1/n",
        preview_length: 40,
        term: TermRule::Reciprocal,
        limit_value: Some(0.0),
        explanation: "a_n = 1/n decreases monotonically and is bounded, so it converges to 0.",
    },
    SequenceSeed {
        name: "(-1)^n",
        formula: "a_n = (-1)^n",
        preview_length: 20,
        term: TermRule::AlternatingSign,
        limit_value: None,
        explanation: "a_n = (-1)^n keeps jumping between two values, so it never settles on one point.",
    },
    SequenceSeed {
        name: "n",
        formula: "a_n = n",
        preview_length: 20,
        term: TermRule::Identity,
        limit_value: None,
        explanation: "a_n = n increases without bound, so no limit exists.",
    },
    SequenceSeed {
        name: "(-1)^n / n",
        formula: "a_n = (-1)^n / n",
        preview_length: 60,
        term: TermRule::AlternatingReciprocal,
        limit_value: Some(0.0),
        explanation: "a_n = (-1)^n / n changes sign every step, but its size shrinks to 0, so it converges to 0.",
    },
    SequenceSeed {
        name: "ln(n)",
        formula: "a_n = ln n",
        preview_length: 40,
        term: TermRule::NaturalLog,
        limit_value: None,
        explanation: "a_n = ln n grows very slowly, but it never stops growing, so it diverges.",
    },
    SequenceSeed {
        name: "sin(n)",
        formula: "a_n = sin n",
        preview_length: 60,
        term: TermRule::Sine,
        limit_value: None,
        explanation: "a_n = sin n wanders between -1 and 1 without a pattern and does not converge.",
    },
];

//
// ─── CLASSIC ───────────────────────────────────────────────────────────────────
//

const CLASSIC_QUESTIONS: &[(&str, &str)] = &[
    ("convergent", "Does the sequence converge?"),
    ("bounded", "Is the sequence bounded above and below?"),
    ("monotone", "From some index on, is it monotone (always increasing or always decreasing)?"),
    ("sign_changes", "Does the sign of the terms change infinitely often?"),
    ("n_times_conv", "Does n·a_n converge?"),
    ("abs_conv", "Does |a_n| converge?"),
    ("piecewise2", "Is it defined by two formulas (e.g. even and odd indices)?"),
];

// Rows follow `SEQUENCES`; columns follow `CLASSIC_QUESTIONS`.
const CLASSIC_ANSWERS: [[Option<bool>; 7]; 6] = [
    [T, T, T, F, F, T, F],
    [F, T, F, T, U, F, T],
    [F, F, T, F, U, F, F],
    [T, T, F, T, F, T, T],
    [F, F, T, F, U, F, F],
    [F, T, F, T, U, F, F],
];

//
// ─── EXTENDED ──────────────────────────────────────────────────────────────────
//

const EXTENDED_QUESTIONS: &[(&str, &str)] = &[
    ("convergent", "Does this sequence converge or not?"),
    ("bounded", "Can the sequence be called bounded above and below?"),
    ("monotone", "From some point on, does it move in only one direction?"),
    ("sign_changes", "Do the signs of the terms flip infinitely often?"),
    ("abs_conv", "Does the sequence of absolute values |a_n| converge?"),
    ("piecewise2", "Is it split into two cases (such as even and odd) with different formulas?"),
    ("n_times_conv", "Does the sequence n·a_n, obtained by multiplying by n, converge?"),
    ("even_subseq_conv", "Does the subsequence of even terms (a_2, a_4, ...) converge?"),
    ("odd_subseq_conv", "Does the subsequence of odd terms (a_1, a_3, ...) converge?"),
    ("with_1_over_n_conv", "Does the termwise product with 1/n, a_n·(1/n), converge?"),
];

// Rows follow `SEQUENCES`; columns follow `EXTENDED_QUESTIONS`.
const EXTENDED_ANSWERS: [[Option<bool>; 10]; 6] = [
    [T, T, T, F, T, F, T, T, T, T],
    [F, T, F, T, F, T, F, T, T, T],
    [F, F, T, F, F, F, F, F, F, T],
    [T, T, F, T, T, T, F, T, T, T],
    [F, F, T, F, F, F, F, F, F, T],
    [F, T, F, T, F, F, F, F, F, T],
];

fn assemble<const N: usize>(
    questions: &[(&str, &str)],
    answers: &[[Option<bool>; N]; 6],
) -> Result<QuizCatalog, CatalogError> {
    let questions = questions
        .iter()
        .map(|(key, prompt)| -> Result<Question, CatalogError> {
            Ok(Question::new(QuestionKey::new(*key)?, *prompt))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let catalog = QuestionCatalog::new(questions)?;

    let sequences = SEQUENCES
        .iter()
        .zip(answers)
        .map(|(seed, row)| {
            let properties: BTreeMap<QuestionKey, Answer> = catalog
                .keys()
                .cloned()
                .zip(row.iter().map(|value| Answer::from(*value)))
                .collect();
            SequenceDefinition::new(
                seed.name,
                seed.formula,
                seed.preview_length,
                seed.term,
                properties,
                seed.limit_value,
                seed.explanation,
            )
        })
        .collect();

    QuizCatalog::new(catalog, sequences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_variants_build() {
        let classic = CatalogVariant::Classic.build().unwrap();
        assert_eq!(classic.questions().len(), 7);
        assert_eq!(classic.sequences().len(), 6);

        let extended = CatalogVariant::Extended.build().unwrap();
        assert_eq!(extended.questions().len(), 10);
        assert_eq!(extended.sequences().len(), 6);
    }

    #[test]
    fn authored_disagreements_are_kept() {
        let classic = CatalogVariant::Classic.build().unwrap();
        let extended = CatalogVariant::Extended.build().unwrap();

        let classic_recip = &classic.sequences()[0];
        let extended_recip = &extended.sequences()[0];
        assert_eq!(classic_recip.answer_for("n_times_conv"), Answer::No);
        assert_eq!(extended_recip.answer_for("n_times_conv"), Answer::Yes);

        let classic_alt = &classic.sequences()[1];
        assert_eq!(classic_alt.answer_for("n_times_conv"), Answer::Undefined);
        assert_eq!(classic_alt.answer_for("abs_conv"), Answer::No);
    }

    #[test]
    fn limits_only_on_convergent_sequences() {
        let catalog = CatalogVariant::Extended.build().unwrap();
        for seq in catalog.sequences() {
            let convergent = seq.answer_for("convergent") == Answer::Yes;
            assert_eq!(seq.limit_value().is_some(), convergent, "{}", seq.name());
        }
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Classic".parse::<CatalogVariant>().unwrap(), CatalogVariant::Classic);
        assert_eq!(" extended ".parse::<CatalogVariant>().unwrap(), CatalogVariant::Extended);
        assert!("deluxe".parse::<CatalogVariant>().is_err());
    }
}
