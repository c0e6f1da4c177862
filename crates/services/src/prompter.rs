use tracing::{debug, warn};

use quiz_core::model::{Problem, ProblemError};

use crate::console::{AnswerSource, Console};

/// Asks one problem at a time and judges the answer.
pub struct Prompter<A> {
    input: A,
    console: Console,
}

impl<A: AnswerSource> Prompter<A> {
    #[must_use]
    pub fn new(input: A, console: Console) -> Self {
        Self { input, console }
    }

    /// Block until the user presses enter. The line itself is discarded.
    pub async fn wait_for_enter(&mut self) {
        let _ = self.input.read_line().await;
    }

    /// Prompt for `problem`, record the trimmed reply and judge it.
    ///
    /// An exhausted input stream counts as an empty answer.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::AlreadyAnswered` without prompting if the problem
    /// already holds an answer.
    pub async fn ask(
        &mut self,
        problem: &mut Problem,
        display_index: usize,
    ) -> Result<bool, ProblemError> {
        if problem.is_answered() {
            return Err(ProblemError::AlreadyAnswered {
                index: display_index,
            });
        }

        let prompt = format!(
            "Question #{display_index}: {}\nYour answer: ",
            problem.question()
        );
        if let Err(err) = self.console.write(&prompt) {
            warn!(error = %err, index = display_index, "failed to write prompt");
        }

        let line = self.input.read_line().await.unwrap_or_default();
        let correct = problem.record_answer(display_index, &line)?;
        debug!(index = display_index, correct, "answer recorded");
        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedAnswers;

    #[tokio::test]
    async fn prints_prompt_and_judges_exact_match() {
        let (console, buffer) = Console::capture();
        let mut prompter = Prompter::new(ScriptedAnswers::new(["  4  "]), console);
        let mut problem = Problem::new("2+2?", "4");

        let correct = prompter.ask(&mut problem, 1).await.unwrap();

        assert!(correct);
        assert_eq!(problem.user_answer(), Some("4"));
        assert_eq!(buffer.contents(), "Question #1: 2+2?\nYour answer: ");
    }

    #[tokio::test]
    async fn wrong_answer_is_recorded() {
        let (console, _buffer) = Console::capture();
        let mut prompter = Prompter::new(ScriptedAnswers::new(["London"]), console);
        let mut problem = Problem::new("Capital of France?", "Paris");

        assert!(!prompter.ask(&mut problem, 2).await.unwrap());
        assert_eq!(problem.user_answer(), Some("London"));
    }

    #[tokio::test]
    async fn exhausted_input_is_an_empty_answer() {
        let (console, _buffer) = Console::capture();
        let mut prompter = Prompter::new(ScriptedAnswers::default(), console);
        let mut problem = Problem::new("2+2?", "4");

        assert!(!prompter.ask(&mut problem, 1).await.unwrap());
        assert_eq!(problem.user_answer(), Some(""));
    }

    #[tokio::test]
    async fn answered_problem_is_not_asked_again() {
        let (console, buffer) = Console::capture();
        let mut prompter = Prompter::new(ScriptedAnswers::new(["4"]), console);
        let mut problem = Problem::new("2+2?", "4");
        problem.record_answer(1, "5").unwrap();

        let err = prompter.ask(&mut problem, 1).await.unwrap_err();

        assert_eq!(err, ProblemError::AlreadyAnswered { index: 1 });
        assert!(buffer.contents().is_empty());
        assert_eq!(problem.user_answer(), Some("5"));
    }

    #[tokio::test]
    async fn enter_consumes_one_line() {
        let (console, _buffer) = Console::capture();
        let answers = ScriptedAnswers::new(["", "4"]);
        let mut prompter = Prompter::new(answers, console);
        let mut problem = Problem::new("2+2?", "4");

        prompter.wait_for_enter().await;

        assert!(prompter.ask(&mut problem, 1).await.unwrap());
    }
}
