use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinError;
use tracing::{info, warn};

use quiz_core::model::{ProblemSet, SessionPhase, SessionSummary, TerminationReason};

use super::activities::{ask_all, countdown};
use crate::Clock;
use crate::config::QuizConfig;
use crate::console::{AnswerSource, Console};
use crate::error::SessionError;
use crate::prompter::Prompter;

pub const WELCOME_LINE: &str = "Welcome to today's quiz! Please press ENTER to start.";

/// Final state of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub reason: TerminationReason,
    pub summary: SessionSummary,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// The answered problems. `None` when the question activity was abandoned.
    pub problems: Option<ProblemSet>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed quiz run.
///
/// Owns the problem set and the score. Once started, questions are asked on one
/// task while a countdown runs on another; whichever ends first finishes the
/// session and the other is abandoned.
pub struct QuizSession {
    problems: ProblemSet,
    time_limit: Duration,
    clock: Clock,
    phase: SessionPhase,
    // Written only by the question activity.
    correct: Arc<AtomicUsize>,
}

impl QuizSession {
    #[must_use]
    pub fn new(problems: ProblemSet, time_limit: Duration) -> Self {
        Self {
            problems,
            time_limit,
            clock: Clock::system(),
            phase: SessionPhase::NotStarted,
            correct: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn from_config(problems: ProblemSet, config: &QuizConfig) -> Self {
        Self::new(problems, config.time_limit())
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run the session to the end and print the summary.
    ///
    /// Must be called inside a Tokio runtime. The summary is printed exactly
    /// once, whichever activity wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Console` if the welcome line or the summary cannot
    /// be written. State and summary errors indicate a broken invariant.
    pub async fn run<A>(mut self, input: A, console: Console) -> Result<SessionOutcome, SessionError>
    where
        A: AnswerSource + 'static,
    {
        console.line(WELCOME_LINE)?;
        let mut prompter = Prompter::new(input, console.clone());
        prompter.wait_for_enter().await;

        let started_at = self.clock.now();
        self.phase.start(started_at)?;
        let total = self.problems.len();
        info!(
            total,
            time_limit_secs = self.time_limit.as_secs(),
            "session started"
        );

        let problems = std::mem::take(&mut self.problems);
        let mut questions = tokio::spawn(ask_all(
            problems,
            prompter,
            Arc::clone(&self.correct),
            console.clone(),
        ));
        let mut timer = tokio::spawn(countdown(self.time_limit, console.clone()));

        let (reason, answered) = tokio::select! {
            joined = &mut questions => (TerminationReason::Completed, finished("questions", joined)),
            joined = &mut timer => {
                let _ = finished("timer", joined);
                (TerminationReason::TimedOut, None)
            }
        };

        // The score stops here; anything the loser does later is not counted.
        let correct = self.correct.load(Ordering::SeqCst);
        questions.abort();
        timer.abort();

        let finished_at = self.clock.now().max(started_at);
        self.phase.finish(reason, finished_at)?;
        let summary = SessionSummary::new(total, correct)?;
        console.line(&summary.render())?;

        info!(
            %reason,
            correct,
            total,
            elapsed_ms = self.phase.elapsed().map_or(0, |d| d.num_milliseconds()),
            "session finished"
        );

        Ok(SessionOutcome {
            reason,
            summary,
            started_at,
            finished_at,
            problems: answered,
        })
    }
}

fn finished<T>(activity: &str, joined: Result<T, JoinError>) -> Option<T> {
    match joined {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(activity, error = %err, "session activity ended abnormally");
            None
        }
    }
}
