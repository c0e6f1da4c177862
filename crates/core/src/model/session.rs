use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("session already started")]
    AlreadyStarted,

    #[error("session is not running")]
    NotRunning,

    #[error("session already finished")]
    AlreadyFinished,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every problem was asked and answered.
    Completed,
    /// The time limit elapsed first.
    TimedOut,
}

impl TerminationReason {
    /// Line printed by the activity that ended the session.
    #[must_use]
    pub fn banner(self) -> &'static str {
        match self {
            TerminationReason::Completed => "Quiz Completed!",
            TerminationReason::TimedOut => "Time's up!",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Completed => f.write_str("completed"),
            TerminationReason::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Lifecycle of one quiz session.
///
/// `NotStarted -> Running -> Finished`. `Finished` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running {
        started_at: DateTime<Utc>,
    },
    Finished {
        reason: TerminationReason,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    },
}

impl SessionPhase {
    /// Enter `Running`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyStarted` while running and `AlreadyFinished` once finished.
    pub fn start(&mut self, at: DateTime<Utc>) -> Result<(), SessionStateError> {
        match self {
            SessionPhase::NotStarted => {
                *self = SessionPhase::Running { started_at: at };
                Ok(())
            }
            SessionPhase::Running { .. } => Err(SessionStateError::AlreadyStarted),
            SessionPhase::Finished { .. } => Err(SessionStateError::AlreadyFinished),
        }
    }

    /// Enter `Finished` with the given reason.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` before start and `AlreadyFinished` once finished.
    pub fn finish(
        &mut self,
        reason: TerminationReason,
        at: DateTime<Utc>,
    ) -> Result<(), SessionStateError> {
        match *self {
            SessionPhase::Running { started_at } => {
                *self = SessionPhase::Finished {
                    reason,
                    started_at,
                    finished_at: at.max(started_at),
                };
                Ok(())
            }
            SessionPhase::NotStarted => Err(SessionStateError::NotRunning),
            SessionPhase::Finished { .. } => Err(SessionStateError::AlreadyFinished),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, SessionPhase::Running { .. })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionPhase::Finished { .. })
    }

    #[must_use]
    pub fn reason(&self) -> Option<TerminationReason> {
        match self {
            SessionPhase::Finished { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Wall time between start and finish, once finished.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            SessionPhase::Finished {
                started_at,
                finished_at,
                ..
            } => Some(*finished_at - *started_at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn runs_through_the_happy_path() {
        let now = fixed_now();
        let mut phase = SessionPhase::default();

        phase.start(now).unwrap();
        assert!(phase.is_running());

        phase
            .finish(TerminationReason::TimedOut, now + Duration::seconds(30))
            .unwrap();

        assert!(phase.is_finished());
        assert_eq!(phase.reason(), Some(TerminationReason::TimedOut));
        assert_eq!(phase.elapsed(), Some(Duration::seconds(30)));
    }

    #[test]
    fn cannot_finish_before_start() {
        let mut phase = SessionPhase::NotStarted;
        let err = phase
            .finish(TerminationReason::Completed, fixed_now())
            .unwrap_err();
        assert_eq!(err, SessionStateError::NotRunning);
    }

    #[test]
    fn finished_is_terminal() {
        let now = fixed_now();
        let mut phase = SessionPhase::NotStarted;
        phase.start(now).unwrap();
        phase.finish(TerminationReason::Completed, now).unwrap();

        assert_eq!(
            phase.finish(TerminationReason::TimedOut, now),
            Err(SessionStateError::AlreadyFinished)
        );
        assert_eq!(phase.start(now), Err(SessionStateError::AlreadyFinished));
        assert_eq!(phase.reason(), Some(TerminationReason::Completed));
    }

    #[test]
    fn double_start_is_rejected() {
        let now = fixed_now();
        let mut phase = SessionPhase::NotStarted;
        phase.start(now).unwrap();
        assert_eq!(phase.start(now), Err(SessionStateError::AlreadyStarted));
    }

    #[test]
    fn banners_match_console_text() {
        assert_eq!(TerminationReason::Completed.banner(), "Quiz Completed!");
        assert_eq!(TerminationReason::TimedOut.banner(), "Time's up!");
    }
}
