//! Line-oriented terminal front end for a quiz session.

use std::io::{self, BufRead, Write};

use quiz_core::model::{Answer, Convergence};
use quiz_core::preview::TailTrend;
use services::{QuizError, QuizSession, StopReason};
use tracing::debug;

/// Rows shown in the preview table; the trend hint still uses every previewed term.
const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    New,
    List,
    Ask(String),
    Log,
    Preview,
    Status,
    Reveal,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));
        match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "new" | "start" | "reset" => Self::New,
            "list" | "questions" => Self::List,
            "ask" if !rest.is_empty() => Self::Ask(rest.to_owned()),
            "log" => Self::Log,
            "preview" => Self::Preview,
            "status" => Self::Status,
            "reveal" => Self::Reveal,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_owned()),
        }
    }
}

/// Reads commands from `input` until EOF or `quit`, writing the transcript to `out`.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing output. Quiz errors are
/// printed and the loop continues.
pub fn run(session: &mut QuizSession, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Sequence twenty questions: a sequence is hidden, ask yes/no questions to find out how it behaves."
    )?;
    writeln!(out, "Type `new` to start a round or `help` for commands.")?;
    prompt(&mut out)?;

    for line in input.lines() {
        let command = Input::parse(&line?);
        debug!(?command, "command received");
        if command == Input::Quit {
            break;
        }
        if let Err(err) = handle(session, command, &mut out)? {
            writeln!(out, "! {err}")?;
        }
        prompt(&mut out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn handle(
    session: &mut QuizSession,
    command: Input,
    out: &mut impl Write,
) -> io::Result<Result<(), QuizError>> {
    match command {
        Input::New => {
            if let Err(err) = session.start_round() {
                return Ok(Err(err));
            }
            writeln!(out, "A new sequence has been hidden. Here is what you can see:")?;
            write_preview(session, out)?;
            write_status(session, out)?;
        }
        Input::List => match session.remaining_questions() {
            Ok(remaining) if remaining.is_empty() => {
                writeln!(out, "Every question has already been asked.")?;
            }
            Ok(remaining) => {
                for (i, question) in remaining.iter().enumerate() {
                    writeln!(out, "{:>2}. [{}] {}", i + 1, question.key(), question.prompt())?;
                }
            }
            Err(err) => return Ok(Err(err)),
        },
        Input::Ask(choice) => {
            let key = match resolve_choice(session, &choice) {
                Ok(key) => key,
                Err(err) => return Ok(Err(err)),
            };
            match session.ask_question(&key) {
                Ok(answer) => {
                    let prompt = session
                        .catalog()
                        .question(&key)
                        .map_or(key.as_str(), |q| q.prompt());
                    writeln!(out, "{prompt} -> {}", describe(answer))?;
                    write_status(session, out)?;
                }
                Err(err) => return Ok(Err(err)),
            }
        }
        Input::Log => {
            if !session.is_round_active() {
                return Ok(Err(QuizError::NoActiveRound));
            }
            if session.asked().is_empty() {
                writeln!(out, "No questions asked yet.")?;
            }
            for entry in session.asked() {
                let prompt = session
                    .catalog()
                    .question(entry.key.as_str())
                    .map_or(entry.key.as_str(), |q| q.prompt());
                writeln!(out, "- {prompt} -> {}", describe(entry.answer))?;
            }
        }
        Input::Preview => {
            if !session.is_round_active() {
                return Ok(Err(QuizError::NoActiveRound));
            }
            write_preview(session, out)?;
        }
        Input::Status => {
            if !session.is_round_active() {
                return Ok(Err(QuizError::NoActiveRound));
            }
            write_status(session, out)?;
        }
        Input::Reveal => {
            let reveal = match session.reveal_answer() {
                Ok(reveal) => reveal,
                Err(err) => return Ok(Err(err)),
            };
            writeln!(out, "The hidden sequence was `{}`: {}", reveal.name(), reveal.formula())?;
            match reveal.verdict {
                Convergence::Convergent { limit } => {
                    writeln!(out, "It converges. The limit is {limit}.")?;
                }
                Convergence::Divergent => writeln!(out, "It does not converge.")?,
            }
            for (question, answer) in &reveal.properties {
                writeln!(out, "- {} -> {}", question.prompt(), describe(*answer))?;
            }
            writeln!(out, "{}", reveal.explanation())?;
            writeln!(
                out,
                "Looking back: which question was decisive, and which one could you have skipped?"
            )?;
        }
        Input::Help => write_help(out)?,
        Input::Empty | Input::Quit => {}
        Input::Unknown(raw) => writeln!(out, "Unknown command `{raw}`. Type `help`.")?,
    }
    Ok(Ok(()))
}

/// Accepts either a question key or a 1-based position in the remaining list.
///
/// Once the budget is spent the raw choice is passed through, so the session
/// reports the budget instead of a bad list number.
fn resolve_choice(session: &QuizSession, choice: &str) -> Result<String, QuizError> {
    let budget_exhausted = session
        .progress()
        .is_some_and(|progress| progress.budget_exhausted);
    if budget_exhausted {
        return Ok(choice.to_owned());
    }
    if let Ok(position) = choice.parse::<usize>() {
        let remaining = session.remaining_questions()?;
        return position
            .checked_sub(1)
            .and_then(|i| remaining.get(i))
            .map(|q| q.key().to_string())
            .ok_or_else(|| QuizError::UnknownQuestionKey {
                key: choice.to_owned(),
            });
    }
    Ok(choice.to_owned())
}

fn describe(answer: Answer) -> String {
    if answer.is_defined() {
        answer.label().to_owned()
    } else {
        format!("{} (not assigned for this sequence)", answer.label())
    }
}

fn write_preview(session: &QuizSession, out: &mut impl Write) -> io::Result<()> {
    let Some(sequence) = session.active_sequence() else {
        return Ok(());
    };
    let rows = sequence.preview();
    writeln!(out, "   n | a_n")?;
    for row in rows.iter().take(PREVIEW_ROWS) {
        writeln!(out, "{:>4} | {}", row.n, row.value)?;
    }
    let hint = match TailTrend::analyze(&rows) {
        TailTrend::LikelyConvergent { approx } => {
            format!("the last terms settle near {approx:.4}")
        }
        TailTrend::LikelyDivergent => "the last terms are very large".to_owned(),
        TailTrend::Irregular => "the last terms keep moving".to_owned(),
        TailTrend::Insufficient => "no defined terms to judge".to_owned(),
    };
    writeln!(out, "({} terms computed; {hint})", rows.len())
}

fn write_status(session: &QuizSession, out: &mut impl Write) -> io::Result<()> {
    let Some(progress) = session.progress() else {
        return Ok(());
    };
    writeln!(
        out,
        "Questions used: {}/{} ({} unasked).",
        progress.questions_used, progress.budget, progress.questions_remaining
    )?;
    match progress.stop_reason() {
        Some(StopReason::BudgetExhausted) => writeln!(
            out,
            "No more questions are allowed. Decide from the clues you have, then `reveal`."
        ),
        Some(StopReason::QuestionsExhausted) => {
            writeln!(out, "There are no new questions left to ask.")
        }
        None => Ok(()),
    }
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  new            start a new round (discards the current one)")?;
    writeln!(out, "  list           show questions not asked yet")?;
    writeln!(out, "  ask <key|#>    ask a question by key or list number")?;
    writeln!(out, "  log            show questions asked so far")?;
    writeln!(out, "  preview        show the first terms again")?;
    writeln!(out, "  status         show the question budget")?;
    writeln!(out, "  reveal         show the hidden sequence")?;
    writeln!(out, "  quit           leave")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::CatalogVariant;
    use quiz_core::model::QuestionBudget;
    use std::io::Cursor;
    use std::sync::Arc;

    fn session(budget: u32) -> QuizSession {
        let catalog = Arc::new(CatalogVariant::Classic.build().unwrap());
        QuizSession::with_seed(catalog, QuestionBudget::new(budget).unwrap(), 11)
    }

    fn play(session: &mut QuizSession, script: &str) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script.to_owned()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn input_parsing_handles_case_and_arguments() {
        assert_eq!(Input::parse("  ASK bounded "), Input::Ask("bounded".into()));
        assert_eq!(Input::parse("ask"), Input::Unknown("ask".into()));
        assert_eq!(Input::parse(""), Input::Empty);
        assert_eq!(Input::parse("exit"), Input::Quit);
    }

    #[test]
    fn commands_before_a_round_report_no_active_round() {
        let mut quiz = session(8);
        let transcript = play(&mut quiz, "ask convergent\nreveal\nlist\n");
        assert_eq!(transcript.matches("no round is active").count(), 3);
    }

    #[test]
    fn round_transcript_asks_by_number_and_reveals() {
        let mut quiz = session(2);
        let transcript = play(&mut quiz, "new\nask 1\nask bounded\nask monotone\nreveal\nquit\n");

        assert!(transcript.contains("A new sequence has been hidden"));
        assert!(transcript.contains("Questions used: 2/2"));
        assert!(transcript.contains("the question budget of 2 is used up"));
        assert!(transcript.contains("The hidden sequence was"));

        let keys: Vec<_> = quiz.asked().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["convergent", "bounded"]);
        assert!(quiz.answer_revealed());
    }

    #[test]
    fn list_number_after_budget_reports_budget() {
        let mut quiz = session(1);
        let transcript = play(&mut quiz, "new\nask 1\nask 99\nask 1\n");
        assert_eq!(transcript.matches("the question budget of 1 is used up").count(), 2);
        assert!(!transcript.contains("unknown question key"));
        assert_eq!(quiz.questions_used(), 1);
    }

    #[test]
    fn unknown_list_number_is_reported_while_budget_remains() {
        let mut quiz = session(8);
        let transcript = play(&mut quiz, "new\nask 99\n");
        assert!(transcript.contains("unknown question key: 99"));
        assert_eq!(quiz.questions_used(), 0);
    }

    #[test]
    fn undefined_answer_is_labelled() {
        assert_eq!(describe(Answer::Yes), "YES");
        assert_eq!(
            describe(Answer::Undefined),
            "UNDEFINED (not assigned for this sequence)"
        );
    }

    #[test]
    fn repeated_question_is_refused() {
        let mut quiz = session(8);
        let transcript = play(&mut quiz, "new\nask sign_changes\nask sign_changes\n");
        assert!(transcript.contains("question `sign_changes` was already asked this round"));
        assert_eq!(quiz.questions_used(), 1);
    }
}
