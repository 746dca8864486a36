mod answer;
mod budget;
mod catalog;
mod ids;
mod question;
mod sequence;
mod term;

pub use answer::Answer;
pub use budget::QuestionBudget;
pub use catalog::{MAX_PREVIEW_LENGTH, QuizCatalog};
pub use ids::{QuestionKey, RoundId};
pub use question::{Question, QuestionCatalog};
pub use sequence::{Convergence, PreviewRow, SequenceDefinition};
pub use term::{TermRule, TermValue};
