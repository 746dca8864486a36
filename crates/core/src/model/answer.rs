use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state answer to a yes/no question about a sequence.
///
/// `Undefined` means the property is not meaningfully assigned for the
/// sequence. It is distinct from `No` and is rendered differently on reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Answer {
    Yes,
    No,
    Undefined,
}

impl Answer {
    #[must_use]
    pub fn as_option(self) -> Option<bool> {
        match self {
            Answer::Yes => Some(true),
            Answer::No => Some(false),
            Answer::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_defined(self) -> bool {
        !matches!(self, Answer::Undefined)
    }

    /// Short uppercase label for transcripts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
            Answer::Undefined => "UNDEFINED",
        }
    }
}

impl From<Option<bool>> for Answer {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Answer::Yes,
            Some(false) => Answer::No,
            None => Answer::Undefined,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

impl From<Answer> for Option<bool> {
    fn from(answer: Answer) -> Self {
        answer.as_option()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_null_is_undefined_not_no() {
        let answers: Vec<Answer> = serde_json::from_str("[true, false, null]").unwrap();
        assert_eq!(answers, vec![Answer::Yes, Answer::No, Answer::Undefined]);
        assert_eq!(serde_json::to_string(&Answer::Undefined).unwrap(), "null");
    }

    #[test]
    fn undefined_is_not_defined() {
        assert!(Answer::Yes.is_defined());
        assert!(Answer::No.is_defined());
        assert!(!Answer::Undefined.is_defined());
        assert_eq!(Answer::Undefined.as_option(), None);
    }
}
