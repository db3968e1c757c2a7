use super::method::NormalizationMethod;
use crate::models::{
    MatchKind,
    ValidationLevel,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashSet;

/// Method and inclusion gate for one identification level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSettings {
    #[serde(default = "default_method")]
    pub method: NormalizationMethod,
    /// Minimum validation level a match needs to contribute ratios.
    #[serde(default = "default_min_validation")]
    pub min_validation: ValidationLevel,
}

fn default_method() -> NormalizationMethod {
    NormalizationMethod::Median
}

fn default_min_validation() -> ValidationLevel {
    ValidationLevel::Validated
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            method: default_method(),
            min_validation: default_min_validation(),
        }
    }
}

/// Full normalization configuration for a run.
///
/// The seed and contaminant sets can be expensive to assemble upstream
/// (search parameters, FASTA, variants), so they are resolved once here and
/// shared by every level. `None` disables the respective policy.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NormalizationSettings {
    #[serde(default)]
    pub psm: LevelSettings,
    #[serde(default)]
    pub peptide: LevelSettings,
    #[serde(default)]
    pub protein: LevelSettings,
    /// Accessions of proteins assumed stable across samples.
    #[serde(default)]
    pub seeds: Option<HashSet<String>>,
    /// Accessions excluded from every ratio pool.
    #[serde(default)]
    pub contaminants: Option<HashSet<String>>,
}

impl NormalizationSettings {
    pub fn level(&self, kind: MatchKind) -> &LevelSettings {
        match kind {
            MatchKind::Psm => &self.psm,
            MatchKind::Peptide => &self.peptide,
            MatchKind::Protein => &self.protein,
        }
    }
}
