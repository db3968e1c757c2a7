//! Per-level orchestration of the ratio collection threads.
//!
//! For every identification level the orchestrator spawns a fixed pool of
//! collector threads over one shared match cursor, waits for them with a
//! long but finite bound, merges the worker-private pools and writes one
//! factor per sample. Levels run sequentially PSM -> peptide -> protein;
//! nothing is shared between them except the resolved seed and contaminant
//! sets, which are assembled once per run.

use super::aggregator::{
    compute_factor,
    merge_outputs,
};
use super::collector::{
    collect,
    CollectorContext,
};
use super::factors::NormalizationFactors;
use super::method::NormalizationMethod;
use super::pools::LevelPools;
use super::settings::NormalizationSettings;
use crate::errors::{
    NormalizationError,
    Result,
};
use crate::input::MatchCollections;
use crate::models::MatchKind;
use crate::monitor::{
    ErrorSink,
    LogErrorSink,
    NoopMonitor,
    RunMonitor,
};
use crate::ratio::{
    EmbeddedRatioSource,
    FiniteRatioValidity,
    RatioSource,
    RatioValidity,
};
use crate::stream::{
    MatchStream,
    SliceMatchStream,
};
use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};
use tracing::{
    debug,
    info,
};

/// Generous join bound for very large datasets. Exceeding it is a fatal
/// interrupted-run condition, not a silent continuation.
const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Caller-provided collaborators for one run. Every field has a working
/// default, so `RunContext::default()` gives a silent, non-cancellable run.
#[derive(Clone)]
pub struct RunContext {
    pub monitor: Arc<dyn RunMonitor>,
    pub sink: Arc<dyn ErrorSink>,
    pub validity: Arc<dyn RatioValidity>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            monitor: Arc::new(NoopMonitor),
            sink: Arc::new(LogErrorSink),
            validity: Arc::new(FiniteRatioValidity),
        }
    }
}

/// Merged pools for one completed level, kept around for reporting.
#[derive(Debug)]
pub struct LevelSummary {
    pub kind: MatchKind,
    pub pools: LevelPools,
}

/// Outcome of a full normalization run.
#[derive(Debug)]
pub struct RunSummary {
    pub factors: NormalizationFactors,
    pub levels: Vec<LevelSummary>,
}

pub struct Normalizer {
    pub settings: NormalizationSettings,
    samples: Arc<[String]>,
    seeds: Option<Arc<HashSet<String>>>,
    contaminants: Option<Arc<HashSet<String>>>,
    num_threads: usize,
    join_timeout: Duration,
}

impl Normalizer {
    pub fn new(settings: NormalizationSettings, samples: Vec<String>) -> Self {
        let seeds = settings.seeds.clone().map(Arc::new);
        let contaminants = settings.contaminants.clone().map(Arc::new);
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            settings,
            samples: samples.into(),
            seeds,
            contaminants,
            num_threads,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
        }
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    pub fn with_join_timeout(mut self, join_timeout: Duration) -> Self {
        self.join_timeout = join_timeout;
        self
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Collect ratios for one level and write one factor per sample.
    ///
    /// Returns the merged pools so callers can report pool sizes. On
    /// cancellation or failure no factor is written for this level.
    pub fn normalize_level(
        &self,
        kind: MatchKind,
        stream: Arc<dyn MatchStream>,
        source: Arc<dyn RatioSource>,
        ctx: &RunContext,
        factors: &mut NormalizationFactors,
    ) -> Result<LevelPools> {
        let level = self.settings.level(kind);
        let start = Instant::now();

        if level.method == NormalizationMethod::None {
            for sample in self.samples.iter() {
                factors.insert(kind, sample.clone(), 1.0);
            }
            info!(
                "No {} normalization requested, all factors set to 1.0",
                kind.as_str()
            );
            return Ok(LevelPools::with_samples(&self.samples));
        }

        if ctx.monitor.is_canceled() {
            return Err(NormalizationError::RunCanceled { level: kind }.into());
        }

        let n_matches = stream.len_hint();
        if let Some(n) = n_matches {
            ctx.monitor.set_max_progress(n as u64);
        }

        let collector_ctx = CollectorContext {
            kind,
            min_validation: level.min_validation,
            samples: self.samples.clone(),
            stream,
            source,
            validity: ctx.validity.clone(),
            monitor: ctx.monitor.clone(),
            seeds: self.seeds.clone(),
            contaminants: self.contaminants.clone(),
        };

        let worker_count = self.num_threads;
        let (tx, rx) = mpsc::channel::<LevelPools>();
        for worker_id in 0..worker_count {
            let worker_ctx = collector_ctx.clone();
            let sink = ctx.sink.clone();
            let tx = tx.clone();
            std::thread::Builder::new()
                .name(format!("ratio-collector-{}", worker_id))
                .spawn(move || {
                    let pools = collect(&worker_ctx, sink.as_ref());
                    // The receiver may be gone if the orchestrator gave up.
                    let _ = tx.send(pools);
                })?;
        }
        drop(tx);

        let deadline = Instant::now() + self.join_timeout;
        let mut outputs = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(pools) => outputs.push(pools),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    ctx.monitor.cancel();
                    return Err(NormalizationError::JoinTimeout {
                        level: kind,
                        waited: self.join_timeout,
                    }
                    .into());
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    ctx.monitor.cancel();
                    return Err(NormalizationError::WorkerFailure {
                        level: kind,
                        context: "a collector thread terminated without reporting its pools"
                            .to_string(),
                    }
                    .into());
                }
            }
        }

        if ctx.monitor.is_canceled() {
            return Err(NormalizationError::RunCanceled { level: kind }.into());
        }

        let merged = merge_outputs(outputs, &self.samples);
        for sample in self.samples.iter() {
            let factor = compute_factor(
                level.method,
                merged.ratios.all.get(sample),
                merged.ratios.seed.get(sample),
            )?;
            debug!("{} factor for {}: {}", kind.as_str(), sample, factor);
            factors.insert(kind, sample.clone(), factor);
        }
        info!(
            "Computed {} {} normalization factors over {} matches in {:?}",
            self.samples.len(),
            kind.as_str(),
            n_matches.unwrap_or(0),
            start.elapsed()
        );
        Ok(merged)
    }

    /// Run all three levels over in-memory match collections, sequentially
    /// PSM -> peptide -> protein.
    pub fn normalize_run(
        &self,
        collections: &MatchCollections,
        ctx: &RunContext,
    ) -> Result<RunSummary> {
        let mut factors = NormalizationFactors::default();
        let mut levels = Vec::with_capacity(MatchKind::ALL.len());
        for kind in MatchKind::ALL {
            let stream: Arc<dyn MatchStream> =
                Arc::new(SliceMatchStream::new(collections.of(kind).to_vec()));
            let source: Arc<dyn RatioSource> = Arc::new(EmbeddedRatioSource);
            let pools = self.normalize_level(kind, stream, source, ctx, &mut factors)?;
            levels.push(LevelSummary { kind, pools });
        }
        Ok(RunSummary { factors, levels })
    }
}
