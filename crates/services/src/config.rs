use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FILE_PATH: &str = "quiz1.csv";
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Settings for one quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    file_path: PathBuf,
    time_limit: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = file_path.into();
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}
