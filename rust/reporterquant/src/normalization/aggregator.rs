use super::method::NormalizationMethod;
use super::pools::LevelPools;
use crate::errors::NormalizationError;

/// Merge per-worker pools into a single pool set for the level.
pub fn merge_outputs(
    outputs: impl IntoIterator<Item = LevelPools>,
    samples: &[String],
) -> LevelPools {
    let mut merged = LevelPools::with_samples(samples);
    for pools in outputs {
        merged.extend(pools);
    }
    merged
}

/// Reduce one sample's pools to its normalization factor.
///
/// The seed pool takes precedence whenever it holds any value; it is used
/// exclusively, never merged with the full pool. With no data at all the
/// factor is the identity, whatever the method.
pub fn compute_factor(
    method: NormalizationMethod,
    all: Option<&Vec<f64>>,
    seed: Option<&Vec<f64>>,
) -> Result<f64, NormalizationError> {
    if method == NormalizationMethod::None {
        return Ok(1.0);
    }
    let all = match all {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(1.0),
    };
    let source = match seed {
        Some(values) if !values.is_empty() => values,
        _ => all,
    };
    method.compute(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::pools::RatioPools;

    #[test]
    fn test_empty_all_pool_yields_identity() {
        for method in NormalizationMethod::ALL {
            assert_eq!(compute_factor(method, None, None).unwrap(), 1.0);
            assert_eq!(compute_factor(method, Some(&vec![]), None).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_none_method_yields_identity_with_data() {
        let all = vec![2.0, 4.0];
        let seed = vec![8.0];
        assert_eq!(
            compute_factor(NormalizationMethod::None, Some(&all), Some(&seed)).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_median_over_all_pool_when_seed_empty() {
        let all = vec![1.0, 2.0, 3.0];
        let seed = vec![];
        let factor = compute_factor(NormalizationMethod::Median, Some(&all), Some(&seed)).unwrap();
        assert_eq!(factor, 2.0);
    }

    #[test]
    fn test_seed_pool_takes_precedence_exclusively() {
        let all = vec![10.0, 20.0];
        let seed = vec![5.0];
        let factor = compute_factor(NormalizationMethod::Mean, Some(&all), Some(&seed)).unwrap();
        assert_eq!(factor, 5.0);
    }

    #[test]
    fn test_sum_on_nonempty_pool_is_fatal() {
        let all = vec![1.0];
        assert!(matches!(
            compute_factor(NormalizationMethod::Sum, Some(&all), None),
            Err(NormalizationError::UnsupportedMethod { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_default_sample_entries() {
        let samples = vec!["S1".to_string(), "S2".to_string()];
        let mut worker = LevelPools::default();
        worker.ratios = {
            let mut p = RatioPools::default();
            p.push("S1", 2.0, false);
            p
        };
        let merged = merge_outputs([worker], &samples);
        assert_eq!(merged.ratios.all["S1"], vec![2.0]);
        assert!(merged.ratios.all["S2"].is_empty());
    }
}
