use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("problem #{index} was already answered")]
    AlreadyAnswered { index: usize },
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// One question with its expected answer and, once asked, the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    question: String,
    correct_answer: String,
    user_answer: Option<String>,
}

impl Problem {
    /// Build a problem from raw fields. Surrounding whitespace is stripped.
    pub fn new(question: impl AsRef<str>, correct_answer: impl AsRef<str>) -> Self {
        Self {
            question: question.as_ref().trim().to_owned(),
            correct_answer: correct_answer.as_ref().trim().to_owned(),
            user_answer: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// The trimmed answer given by the user, if the problem has been asked.
    #[must_use]
    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// Returns true iff the recorded answer matches the expected answer byte for byte.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer.as_deref() == Some(self.correct_answer.as_str())
    }

    /// Store the user's answer and judge it.
    ///
    /// The raw line is trimmed; no other normalization is applied, so the
    /// comparison is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::AlreadyAnswered` if an answer was recorded before.
    /// `index` is only used to label that error.
    pub fn record_answer(&mut self, index: usize, raw: &str) -> Result<bool, ProblemError> {
        if self.user_answer.is_some() {
            return Err(ProblemError::AlreadyAnswered { index });
        }
        self.user_answer = Some(raw.trim().to_owned());
        Ok(self.is_correct())
    }
}

//
// ─── PROBLEM SET ──────────────────────────────────────────────────────────────
//

/// The ordered problems of one session.
///
/// The order is fixed at construction; only the contained problems mutate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    #[must_use]
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Problem> {
        self.problems.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Problem> {
        self.problems.iter_mut()
    }

    /// Number of problems answered so far.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.problems.iter().filter(|p| p.is_answered()).count()
    }

    /// Number of problems answered correctly so far.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.problems.iter().filter(|p| p.is_correct()).count()
    }
}

impl<'a> IntoIterator for &'a ProblemSet {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
