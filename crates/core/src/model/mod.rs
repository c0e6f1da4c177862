mod problem;
mod session;
mod summary;

pub use problem::{Problem, ProblemError, ProblemSet};
pub use session::{SessionPhase, SessionStateError, TerminationReason};
pub use summary::{SessionSummary, SummaryError};
