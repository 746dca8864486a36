mod progress;
mod reveal;
mod round;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::{QuizProgress, StopReason};
pub use reveal::Reveal;
pub use round::AskedQuestion;
pub use session::QuizSession;
