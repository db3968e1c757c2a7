use serde::{
    Deserialize,
    Serialize,
};

/// Confidence tier assigned to an identification match.
///
/// The ordering is meaningful: a match is kept for ratio collection only if
/// its level is at or above the configured minimum for its kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    #[default]
    #[serde(rename = "none")]
    NotValidated,
    Doubtful,
    Validated,
    Confident,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::NotValidated => "none",
            ValidationLevel::Doubtful => "doubtful",
            ValidationLevel::Validated => "validated",
            ValidationLevel::Confident => "confident",
        }
    }
}
