#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod error;
pub mod loader;
pub mod prompter;
pub mod sessions;

pub use quiz_core::Clock;

pub use config::{DEFAULT_FILE_PATH, DEFAULT_TIME_LIMIT_SECS, QuizConfig};
pub use console::{AnswerSource, CaptureBuffer, ChannelAnswers, Console, ScriptedAnswers};
pub use error::{LoadError, SessionError};
pub use loader::{load_problems, load_problems_from_reader, permutation};
pub use prompter::Prompter;
pub use sessions::{QuizSession, SessionOutcome, WELCOME_LINE};
