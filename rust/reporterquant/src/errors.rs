use crate::models::MatchKind;
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while turning raw ratio pools into normalization factors.
#[derive(Debug)]
pub enum NormalizationError {
    /// The method is part of the closed set but has no computation yet.
    UnsupportedMethod {
        method: &'static str,
        context: String,
    },
    /// Lookup by name or index that matches no known method.
    UnrecognizedMethod {
        input: String,
    },
    /// A collector thread failed; the run was marked canceled.
    WorkerFailure {
        level: MatchKind,
        context: String,
    },
    /// Collector threads did not join within the configured bound.
    JoinTimeout {
        level: MatchKind,
        waited: Duration,
    },
    /// Cancellation was observed before factors could be written.
    RunCanceled {
        level: MatchKind,
    },
}

impl std::fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizationError::UnsupportedMethod { method, context } => {
                write!(
                    f,
                    "Normalization method '{}' is not implemented: {}",
                    method, context
                )
            }
            NormalizationError::UnrecognizedMethod { input } => {
                write!(f, "Unrecognized normalization method '{}'", input)
            }
            NormalizationError::WorkerFailure { level, context } => {
                write!(
                    f,
                    "Ratio collection failed at the {} level: {}",
                    level.as_str(),
                    context
                )
            }
            NormalizationError::JoinTimeout { level, waited } => {
                write!(
                    f,
                    "Ratio collection at the {} level did not finish within {:?}",
                    level.as_str(),
                    waited
                )
            }
            NormalizationError::RunCanceled { level } => {
                write!(
                    f,
                    "Run canceled before {} factors were written",
                    level.as_str()
                )
            }
        }
    }
}

#[derive(Debug)]
pub enum QuantError {
    Normalization(NormalizationError),
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },
    ParseError {
        msg: String,
    },
    TableWriting {
        msg: String,
        path: PathBuf,
    },
}

impl std::fmt::Display for QuantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T> = std::result::Result<T, QuantError>;

impl From<NormalizationError> for QuantError {
    fn from(x: NormalizationError) -> Self {
        Self::Normalization(x)
    }
}

impl From<std::io::Error> for QuantError {
    fn from(x: std::io::Error) -> Self {
        Self::Io {
            source: x,
            path: None,
        }
    }
}

impl From<serde_json::Error> for QuantError {
    fn from(val: serde_json::Error) -> Self {
        QuantError::ParseError {
            msg: val.to_string(),
        }
    }
}
