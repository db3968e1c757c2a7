use crate::errors::NormalizationError;
use serde::{
    Deserialize,
    Serialize,
};

/// Statistic used to reduce a per-sample ratio pool to a single
/// normalization factor.
///
/// The set is closed on purpose: `Sum` and `Mode` are declared so that
/// settings naming them parse, but asking them to compute is a
/// configuration error, never a silent fallback to another statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    None,
    Median,
    Mean,
    Sum,
    Mode,
}

impl NormalizationMethod {
    pub const ALL: [NormalizationMethod; 5] = [
        NormalizationMethod::None,
        NormalizationMethod::Median,
        NormalizationMethod::Mean,
        NormalizationMethod::Sum,
        NormalizationMethod::Mode,
    ];

    pub fn index(&self) -> u8 {
        match self {
            NormalizationMethod::None => 0,
            NormalizationMethod::Median => 1,
            NormalizationMethod::Mean => 2,
            NormalizationMethod::Sum => 3,
            NormalizationMethod::Mode => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NormalizationMethod::None => "none",
            NormalizationMethod::Median => "median",
            NormalizationMethod::Mean => "mean",
            NormalizationMethod::Sum => "sum",
            NormalizationMethod::Mode => "mode",
        }
    }

    pub fn from_index(index: u8) -> Result<Self, NormalizationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.index() == index)
            .ok_or_else(|| NormalizationError::UnrecognizedMethod {
                input: index.to_string(),
            })
    }

    pub fn from_name(name: &str) -> Result<Self, NormalizationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| NormalizationError::UnrecognizedMethod {
                input: name.to_string(),
            })
    }

    /// Apply the statistic to a non-empty value pool.
    ///
    /// Callers are expected to have handled the empty-pool case already
    /// (empty pools mean "no normalization", factor 1.0).
    pub fn compute(&self, values: &[f64]) -> Result<f64, NormalizationError> {
        match self {
            NormalizationMethod::None => Ok(1.0),
            NormalizationMethod::Median => Ok(median(values)),
            NormalizationMethod::Mean => Ok(mean(values)),
            NormalizationMethod::Sum => Err(NormalizationError::UnsupportedMethod {
                method: "sum",
                context: "sum normalization is declared but not implemented".to_string(),
            }),
            NormalizationMethod::Mode => Err(NormalizationError::UnsupportedMethod {
                method: "mode",
                context: "mode normalization is declared but not implemented".to_string(),
            }),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard median: midpoint of the sorted values, averaging the two middle
/// elements for even counts.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
