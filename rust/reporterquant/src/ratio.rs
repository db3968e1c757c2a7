use crate::errors::Result;
use crate::models::QuantMatch;

/// Per-sample raw ratio lookup for one match.
///
/// Implementations may hit a backing store, so every accessor is fallible;
/// `Ok(None)` means the match simply has no ratio for that sample.
/// The unique/shared variants are only meaningful for protein matches and
/// should return `Ok(None)` elsewhere.
pub trait RatioSource: Send + Sync {
    fn raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>>;

    fn unique_raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>>;

    fn shared_raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>>;
}

/// Reads the ratios already embedded in the match itself.
///
/// This is the path used when matches are loaded from a quant file; a
/// store-backed implementation can replace it without touching the
/// collection logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedRatioSource;

impl RatioSource for EmbeddedRatioSource {
    fn raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>> {
        Ok(m.ratios.get(sample).copied())
    }

    fn unique_raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>> {
        Ok(m.unique_ratios.get(sample).copied())
    }

    fn shared_raw_ratio(&self, m: &QuantMatch, sample: &str) -> Result<Option<f64>> {
        Ok(m.shared_ratios.get(sample).copied())
    }
}

/// Decides whether a raw ratio is usable at all.
///
/// The strict `> 0` gate is applied by the collector on top of this, so an
/// implementation only has to reject degenerate values.
pub trait RatioValidity: Send + Sync {
    fn is_valid(&self, ratio: f64) -> bool;
}

/// Default validity: finite and not NaN.
#[derive(Debug, Default, Clone, Copy)]
pub struct FiniteRatioValidity;

impl RatioValidity for FiniteRatioValidity {
    fn is_valid(&self, ratio: f64) -> bool {
        ratio.is_finite()
    }
}
