use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CountMismatch { correct: usize, total: usize },
}

/// Final counts of a session, rendered as the end-of-session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    total_questions: usize,
    correct_answers: usize,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SummaryError::CountMismatch` if `correct_answers > total_questions`.
    pub fn new(total_questions: usize, correct_answers: usize) -> Result<Self, SummaryError> {
        if correct_answers > total_questions {
            return Err(SummaryError::CountMismatch {
                correct: correct_answers,
                total: total_questions,
            });
        }
        Ok(Self {
            total_questions,
            correct_answers,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    /// Report text, without a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Questions: {}", self.total_questions)?;
        writeln!(f, "Correct Answers: {}", self.correct_answers)?;
        f.write_str("Thank you for playing!")
    }
}
