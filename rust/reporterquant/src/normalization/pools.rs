use std::collections::HashMap;

/// Parallel "all"/"seed" raw ratio pools, keyed by sample id.
///
/// Each collector thread owns one of these; the orchestrator merges them
/// pairwise after all workers join, so no locking happens on the hot path.
#[derive(Debug, Default, Clone)]
pub struct RatioPools {
    pub all: HashMap<String, Vec<f64>>,
    pub seed: HashMap<String, Vec<f64>>,
}

impl RatioPools {
    /// Pools with an empty entry for every known sample, so samples with
    /// zero qualifying matches still resolve to a default factor.
    pub fn with_samples(samples: &[String]) -> Self {
        let mut out = Self::default();
        for sample in samples {
            out.all.insert(sample.clone(), Vec::new());
            out.seed.insert(sample.clone(), Vec::new());
        }
        out
    }

    /// Add one accepted ratio to the "all" pool, and to the "seed" pool when
    /// the contributing match qualifies as seed.
    pub fn push(&mut self, sample: &str, ratio: f64, seed: bool) {
        self.all.entry(sample.to_string()).or_default().push(ratio);
        if seed {
            self.seed.entry(sample.to_string()).or_default().push(ratio);
        }
    }

    /// Merge another worker's pools into this one. Order is irrelevant for
    /// every supported statistic, so plain concatenation is enough.
    pub fn extend(&mut self, other: RatioPools) {
        for (sample, values) in other.all {
            self.all.entry(sample).or_default().extend(values);
        }
        for (sample, values) in other.seed {
            self.seed.entry(sample).or_default().extend(values);
        }
    }
}

/// Everything one collector accumulates for one level.
///
/// `unique` and `shared` are only populated for protein matches; they mirror
/// the acceptance logic of `ratios` on the unique-only and shared-only raw
/// ratio variants.
#[derive(Debug, Default, Clone)]
pub struct LevelPools {
    pub ratios: RatioPools,
    pub unique: RatioPools,
    pub shared: RatioPools,
}

impl LevelPools {
    pub fn with_samples(samples: &[String]) -> Self {
        Self {
            ratios: RatioPools::with_samples(samples),
            unique: RatioPools::default(),
            shared: RatioPools::default(),
        }
    }

    pub fn extend(&mut self, other: LevelPools) {
        self.ratios.extend(other.ratios);
        self.unique.extend(other.unique);
        self.shared.extend(other.shared);
    }
}
