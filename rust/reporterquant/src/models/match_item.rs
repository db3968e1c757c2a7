use super::ValidationLevel;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

/// Identification level a match belongs to.
///
/// Factors are computed independently per level, in the order
/// PSM -> peptide -> protein.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Psm,
    Peptide,
    Protein,
}

impl MatchKind {
    pub const ALL: [MatchKind; 3] = [MatchKind::Psm, MatchKind::Peptide, MatchKind::Protein];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Psm => "psm",
            MatchKind::Peptide => "peptide",
            MatchKind::Protein => "protein",
        }
    }
}

/// One identification match with its per-sample raw reporter ratios.
///
/// `accessions` holds every protein the underlying peptide maps to; for
/// protein matches it is the group's own accession set. The contaminant and
/// seed policies operate on this set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantMatch {
    /// Stable identifier (spectrum title, peptide key or group accession).
    pub key: String,
    pub kind: MatchKind,
    pub accessions: Vec<String>,
    #[serde(default)]
    pub validation: ValidationLevel,
    /// Raw ratio per sample, straight from the reporter intensities.
    #[serde(default)]
    pub ratios: HashMap<String, f64>,
    /// Protein level only: ratios restricted to peptides unique to the group.
    #[serde(default)]
    pub unique_ratios: HashMap<String, f64>,
    /// Protein level only: ratios from peptides shared with other groups.
    #[serde(default)]
    pub shared_ratios: HashMap<String, f64>,
}
