use crate::models::MatchKind;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

/// Per-level, per-sample normalization factors.
///
/// Created once per quantification run; each (level, sample) entry is
/// written exactly once by the orchestrator and read as a divisor when raw
/// ratios are normalized. Samples without an entry resolve to the identity.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NormalizationFactors {
    psm: HashMap<String, f64>,
    peptide: HashMap<String, f64>,
    protein: HashMap<String, f64>,
}

impl NormalizationFactors {
    fn level(&self, kind: MatchKind) -> &HashMap<String, f64> {
        match kind {
            MatchKind::Psm => &self.psm,
            MatchKind::Peptide => &self.peptide,
            MatchKind::Protein => &self.protein,
        }
    }

    fn level_mut(&mut self, kind: MatchKind) -> &mut HashMap<String, f64> {
        match kind {
            MatchKind::Psm => &mut self.psm,
            MatchKind::Peptide => &mut self.peptide,
            MatchKind::Protein => &mut self.protein,
        }
    }

    pub fn insert(&mut self, kind: MatchKind, sample: String, factor: f64) {
        self.level_mut(kind).insert(sample, factor);
    }

    /// Factor for one (level, sample) pair; identity when none was stored.
    pub fn factor(&self, kind: MatchKind, sample: &str) -> f64 {
        self.level(kind).get(sample).copied().unwrap_or(1.0)
    }

    pub fn has_factors(&self, kind: MatchKind) -> bool {
        !self.level(kind).is_empty()
    }

    pub fn samples(&self, kind: MatchKind) -> impl Iterator<Item = (&str, f64)> {
        self.level(kind).iter().map(|(k, v)| (k.as_str(), *v))
    }
}
