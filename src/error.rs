use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single test step. Never escapes the runner: every step turns
/// it into a failed [`crate::runner::TestResult`].
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StepError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StepResult<T> = std::result::Result<T, StepError>;
