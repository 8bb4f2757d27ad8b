use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Failure to obtain or decode the output of an external tool.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    ExitStatus {
        command: String,
        status: String,
        output: String,
    },

    #[error("`{command}` did not finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    #[error("could not parse output of `{command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// The tool could not be run to completion, as opposed to running and
    /// producing output we could not understand.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, SourceError::Parse { .. })
    }

    /// Whatever the tool printed before failing, if anything was captured.
    pub fn output(&self) -> &str {
        match self {
            SourceError::ExitStatus { output, .. } => output,
            _ => "",
        }
    }
}

/// A string attribute that should have held an integer but did not.
#[derive(Debug, Error)]
#[error("{field} is not an integer: {value:?}")]
pub struct ConversionError {
    pub field: &'static str,
    pub value: String,
    #[source]
    pub source: ParseIntError,
}
