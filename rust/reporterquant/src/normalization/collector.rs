use super::policy::{
    is_contaminant,
    is_seed,
};
use super::pools::LevelPools;
use crate::errors::Result;
use crate::models::{
    MatchKind,
    QuantMatch,
    ValidationLevel,
};
use crate::monitor::{
    ErrorSink,
    RunMonitor,
};
use crate::ratio::{
    RatioSource,
    RatioValidity,
};
use crate::stream::MatchStream;
use std::collections::HashSet;
use std::sync::Arc;

/// Shared, read-only wiring handed to every collector thread of one level.
#[derive(Clone)]
pub(crate) struct CollectorContext {
    pub kind: MatchKind,
    pub min_validation: ValidationLevel,
    pub samples: Arc<[String]>,
    pub stream: Arc<dyn MatchStream>,
    pub source: Arc<dyn RatioSource>,
    pub validity: Arc<dyn RatioValidity>,
    pub monitor: Arc<dyn RunMonitor>,
    pub seeds: Option<Arc<HashSet<String>>>,
    pub contaminants: Option<Arc<HashSet<String>>>,
}

/// Pull matches from the shared stream until it runs dry or the run is
/// canceled, accumulating into worker-private pools.
///
/// Any error escaping match processing is routed to the sink and marks the
/// whole run canceled; the pools accumulated so far are returned untouched.
pub(crate) fn collect(ctx: &CollectorContext, sink: &dyn ErrorSink) -> LevelPools {
    let mut pools = LevelPools::default();
    loop {
        if ctx.monitor.is_canceled() {
            break;
        }
        let Some(m) = ctx.stream.next_match() else {
            break;
        };
        match accumulate_match(ctx, &m, &mut pools) {
            Ok(()) => ctx.monitor.increase_progress(),
            Err(e) => {
                sink.capture(&e);
                ctx.monitor.cancel();
                break;
            }
        }
    }
    pools
}

fn accumulate_match(
    ctx: &CollectorContext,
    m: &QuantMatch,
    pools: &mut LevelPools,
) -> Result<()> {
    // Contaminants never reach any pool, seed or otherwise.
    if is_contaminant(ctx.contaminants.as_deref(), &m.accessions) {
        return Ok(());
    }
    if m.validation < ctx.min_validation {
        return Ok(());
    }
    let seed = is_seed(ctx.seeds.as_deref(), &m.accessions);

    for sample in ctx.samples.iter() {
        // Observed mid-match: abandon the remaining samples, keep what was
        // already added.
        if ctx.monitor.is_canceled() {
            break;
        }
        if let Some(ratio) = ctx.source.raw_ratio(m, sample)? {
            if ctx.validity.is_valid(ratio) && ratio > 0.0 {
                pools.ratios.push(sample, ratio, seed);
            }
        }
        if ctx.kind == MatchKind::Protein {
            if let Some(ratio) = ctx.source.unique_raw_ratio(m, sample)? {
                if ctx.validity.is_valid(ratio) && ratio > 0.0 {
                    pools.unique.push(sample, ratio, seed);
                }
            }
            if let Some(ratio) = ctx.source.shared_raw_ratio(m, sample)? {
                if ctx.validity.is_valid(ratio) && ratio > 0.0 {
                    pools.shared.push(sample, ratio, seed);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QuantError;
    use crate::monitor::{
        CancelFlag,
        NoopMonitor,
    };
    use crate::ratio::{
        EmbeddedRatioSource,
        FiniteRatioValidity,
    };
    use crate::stream::SliceMatchStream;
    use std::collections::HashMap;
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    fn quant_match(
        key: &str,
        kind: MatchKind,
        accessions: &[&str],
        validation: ValidationLevel,
        ratios: &[(&str, f64)],
    ) -> Arc<QuantMatch> {
        Arc::new(QuantMatch {
            key: key.to_string(),
            kind,
            accessions: accessions.iter().map(|s| s.to_string()).collect(),
            validation,
            ratios: ratios.iter().map(|(s, r)| (s.to_string(), *r)).collect(),
            unique_ratios: HashMap::new(),
            shared_ratios: HashMap::new(),
        })
    }

    fn context(
        matches: Vec<Arc<QuantMatch>>,
        seeds: Option<HashSet<String>>,
        contaminants: Option<HashSet<String>>,
        monitor: Arc<dyn RunMonitor>,
    ) -> CollectorContext {
        CollectorContext {
            kind: MatchKind::Psm,
            min_validation: ValidationLevel::Validated,
            samples: vec!["S1".to_string(), "S2".to_string()].into(),
            stream: Arc::new(SliceMatchStream::new(matches)),
            source: Arc::new(EmbeddedRatioSource),
            validity: Arc::new(FiniteRatioValidity),
            monitor,
            seeds: seeds.map(Arc::new),
            contaminants: contaminants.map(Arc::new),
        }
    }

    struct PanickySink;
    impl ErrorSink for PanickySink {
        fn capture(&self, err: &QuantError) {
            panic!("unexpected worker error: {}", err);
        }
    }

    #[test]
    fn test_contaminants_skip_every_pool() {
        let matches = vec![
            quant_match(
                "a",
                MatchKind::Psm,
                &["KERATIN"],
                ValidationLevel::Confident,
                &[("S1", 2.0)],
            ),
            quant_match(
                "b",
                MatchKind::Psm,
                &["P1"],
                ValidationLevel::Confident,
                &[("S1", 3.0)],
            ),
        ];
        let contaminants: HashSet<String> = ["KERATIN".to_string()].into_iter().collect();
        let ctx = context(matches, None, Some(contaminants), Arc::new(NoopMonitor));
        let pools = collect(&ctx, &PanickySink);
        assert_eq!(pools.ratios.all["S1"], vec![3.0]);
    }

    #[test]
    fn test_validation_gate() {
        let matches = vec![
            quant_match(
                "a",
                MatchKind::Psm,
                &["P1"],
                ValidationLevel::Doubtful,
                &[("S1", 2.0)],
            ),
            quant_match(
                "b",
                MatchKind::Psm,
                &["P1"],
                ValidationLevel::Validated,
                &[("S1", 3.0)],
            ),
        ];
        let ctx = context(matches, None, None, Arc::new(NoopMonitor));
        let pools = collect(&ctx, &PanickySink);
        assert_eq!(pools.ratios.all["S1"], vec![3.0]);
    }

    #[test]
    fn test_nonpositive_and_nonfinite_ratios_are_rejected() {
        let matches = vec![quant_match(
            "a",
            MatchKind::Psm,
            &["P1"],
            ValidationLevel::Confident,
            &[("S1", 0.0), ("S2", -1.5)],
        )];
        let ctx = context(matches, None, None, Arc::new(NoopMonitor));
        let pools = collect(&ctx, &PanickySink);
        assert!(pools.ratios.all.get("S1").is_none());
        assert!(pools.ratios.all.get("S2").is_none());

        let matches = vec![quant_match(
            "b",
            MatchKind::Psm,
            &["P1"],
            ValidationLevel::Confident,
            &[("S1", f64::NAN), ("S2", f64::INFINITY)],
        )];
        let ctx = context(matches, None, None, Arc::new(NoopMonitor));
        let pools = collect(&ctx, &PanickySink);
        assert!(pools.ratios.all.get("S1").is_none());
        assert!(pools.ratios.all.get("S2").is_none());
    }

    #[test]
    fn test_seed_matches_feed_both_pools() {
        let matches = vec![
            quant_match(
                "a",
                MatchKind::Psm,
                &["P1"],
                ValidationLevel::Confident,
                &[("S1", 2.0)],
            ),
            quant_match(
                "b",
                MatchKind::Psm,
                &["P1", "P9"],
                ValidationLevel::Confident,
                &[("S1", 4.0)],
            ),
        ];
        let seeds: HashSet<String> = ["P1".to_string()].into_iter().collect();
        let ctx = context(matches, Some(seeds), None, Arc::new(NoopMonitor));
        let pools = collect(&ctx, &PanickySink);
        // "a" is fully contained in the seed set, "b" is not.
        assert_eq!(pools.ratios.all["S1"], vec![2.0, 4.0]);
        assert_eq!(pools.ratios.seed["S1"], vec![2.0]);
    }

    #[test]
    fn test_protein_level_tracks_unique_and_shared_variants() {
        let mut m = QuantMatch {
            key: "grp".to_string(),
            kind: MatchKind::Protein,
            accessions: vec!["P1".to_string()],
            validation: ValidationLevel::Confident,
            ratios: HashMap::new(),
            unique_ratios: HashMap::new(),
            shared_ratios: HashMap::new(),
        };
        m.ratios.insert("S1".to_string(), 2.0);
        m.unique_ratios.insert("S1".to_string(), 3.0);
        m.shared_ratios.insert("S1".to_string(), -1.0);
        let mut ctx = context(vec![Arc::new(m)], None, None, Arc::new(NoopMonitor));
        ctx.kind = MatchKind::Protein;
        let pools = collect(&ctx, &PanickySink);
        assert_eq!(pools.ratios.all["S1"], vec![2.0]);
        assert_eq!(pools.unique.all["S1"], vec![3.0]);
        // Shared variant fails the > 0 gate.
        assert!(pools.shared.all.get("S1").is_none());
    }

    #[test]
    fn test_cancellation_keeps_accumulated_pools() {
        // Monitor that cancels the run after two processed matches.
        #[derive(Default)]
        struct CancelAfterTwo {
            inner: CancelFlag,
            processed: AtomicUsize,
        }
        impl RunMonitor for CancelAfterTwo {
            fn increase_progress(&self) {
                if self.processed.fetch_add(1, Ordering::Relaxed) + 1 >= 2 {
                    self.inner.cancel();
                }
            }
            fn is_canceled(&self) -> bool {
                self.inner.is_canceled()
            }
            fn cancel(&self) {
                self.inner.cancel();
            }
        }

        let matches: Vec<_> = (0..50)
            .map(|i| {
                quant_match(
                    &format!("m{}", i),
                    MatchKind::Psm,
                    &["P1"],
                    ValidationLevel::Confident,
                    &[("S1", 2.0)],
                )
            })
            .collect();
        let ctx = context(matches, None, None, Arc::new(CancelAfterTwo::default()));
        let pools = collect(&ctx, &PanickySink);
        // Stopped early, but what was accumulated is intact.
        assert_eq!(pools.ratios.all["S1"], vec![2.0, 2.0]);
    }

    #[test]
    fn test_source_error_cancels_run_and_reports() {
        struct FailingSource;
        impl RatioSource for FailingSource {
            fn raw_ratio(&self, _m: &QuantMatch, _sample: &str) -> Result<Option<f64>> {
                Err(QuantError::ParseError {
                    msg: "backing store went away".to_string(),
                })
            }
            fn unique_raw_ratio(&self, _m: &QuantMatch, _sample: &str) -> Result<Option<f64>> {
                Ok(None)
            }
            fn shared_raw_ratio(&self, _m: &QuantMatch, _sample: &str) -> Result<Option<f64>> {
                Ok(None)
            }
        }

        #[derive(Default)]
        struct CountingSink {
            captured: AtomicUsize,
        }
        impl ErrorSink for CountingSink {
            fn capture(&self, _err: &QuantError) {
                self.captured.fetch_add(1, Ordering::Relaxed);
            }
        }

        let matches = vec![quant_match(
            "a",
            MatchKind::Psm,
            &["P1"],
            ValidationLevel::Confident,
            &[("S1", 2.0)],
        )];
        let monitor = Arc::new(CancelFlag::new());
        let mut ctx = context(matches, None, None, monitor.clone());
        ctx.source = Arc::new(FailingSource);
        let sink = CountingSink::default();
        let pools = collect(&ctx, &sink);
        assert_eq!(sink.captured.load(Ordering::Relaxed), 1);
        assert!(monitor.is_canceled());
        assert!(pools.ratios.all.is_empty());
    }
}
