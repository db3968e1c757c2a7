use crate::input::MatchCollections;
use crate::models::MatchKind;
use crate::normalization::NormalizationFactors;
use rayon::prelude::*;
use serde::Serialize;

/// One raw ratio together with its normalized value, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRatioRow {
    pub level: &'static str,
    pub key: String,
    pub sample: String,
    pub raw_ratio: f64,
    pub factor: f64,
    pub normalized_ratio: f64,
}

/// Divide every raw ratio by its sample's factor for the matching level.
///
/// Purely per-match work, so it fans out over the rayon pool; row order
/// stays deterministic (level, then match order, then sample order).
pub fn apply_factors(
    collections: &MatchCollections,
    factors: &NormalizationFactors,
    samples: &[String],
) -> Vec<NormalizedRatioRow> {
    let mut rows = Vec::new();
    for kind in MatchKind::ALL {
        let mut kind_rows: Vec<NormalizedRatioRow> = collections
            .of(kind)
            .par_iter()
            .flat_map_iter(|m| {
                samples.iter().filter_map(move |sample| {
                    m.ratios.get(sample.as_str()).map(|&raw| {
                        let factor = factors.factor(kind, sample);
                        NormalizedRatioRow {
                            level: kind.as_str(),
                            key: m.key.clone(),
                            sample: sample.clone(),
                            raw_ratio: raw,
                            factor,
                            normalized_ratio: raw / factor,
                        }
                    })
                })
            })
            .collect();
        rows.append(&mut kind_rows);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        QuantMatch,
        ValidationLevel,
    };
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_apply_divides_by_level_factor() {
        let mut ratios = HashMap::new();
        ratios.insert("S1".to_string(), 4.0);
        ratios.insert("S2".to_string(), 3.0);
        let collections = MatchCollections {
            psms: vec![Arc::new(QuantMatch {
                key: "spec_1".to_string(),
                kind: MatchKind::Psm,
                accessions: vec!["P1".to_string()],
                validation: ValidationLevel::Confident,
                ratios,
                unique_ratios: HashMap::new(),
                shared_ratios: HashMap::new(),
            })],
            ..Default::default()
        };
        let mut factors = NormalizationFactors::default();
        factors.insert(MatchKind::Psm, "S1".to_string(), 2.0);

        let samples = vec!["S1".to_string(), "S2".to_string()];
        let rows = apply_factors(&collections, &factors, &samples);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sample, "S1");
        assert_eq!(rows[0].normalized_ratio, 2.0);
        // No stored factor means the identity is applied.
        assert_eq!(rows[1].sample, "S2");
        assert_eq!(rows[1].factor, 1.0);
        assert_eq!(rows[1].normalized_ratio, 3.0);
    }
}
