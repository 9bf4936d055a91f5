//! Error types shared by every pipeline.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line} of {path:?} exceeds the {limit} byte line limit")]
    LineTooLong {
        path: PathBuf,
        line: u64,
        limit: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No usable lines in {0:?}")]
    EmptyInput(PathBuf),

    #[error("Unknown country: '{0}'")]
    UnknownCountry(String),

    #[error("{path:?} does not look like a phone number list ({plausible}/{sampled} sampled lines are phone-shaped)")]
    NotPhoneList {
        path: PathBuf,
        plausible: usize,
        sampled: usize,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Wrap an `io::Error` with the path it happened on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// True for errors raised before a run touches the filesystem.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter(_) | Self::UnknownCountry(_))
    }
}

/// Closure for `map_err` that attaches `path` to an `io::Error`.
pub(crate) fn io_at(path: &Path) -> impl FnOnce(io::Error) -> PipelineError + '_ {
    move |e| PipelineError::io(path, e)
}
