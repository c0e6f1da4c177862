mod activities;
mod coordinator;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use coordinator::{QuizSession, SessionOutcome, WELCOME_LINE};
