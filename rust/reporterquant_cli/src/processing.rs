use crate::config::{
    AnalysisConfig,
    OutputConfig,
};
use crate::errors::CliError;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use reporterquant::apply::apply_factors;
use reporterquant::export::{
    factor_rows,
    write_factor_table,
    write_ratio_table,
};
use reporterquant::monitor::RunMonitor;
use reporterquant::{
    Normalizer,
    QuantInput,
    RunContext,
};
use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Bridges the engine's progress callbacks onto an indicatif bar.
///
/// Ctrl-C handling or a GUI could flip the cancellation flag instead; the
/// engine only sees the `RunMonitor` trait.
pub struct BarMonitor {
    bar: ProgressBar,
    canceled: AtomicBool,
}

impl BarMonitor {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap();
        bar.set_style(style);
        Self {
            bar,
            canceled: AtomicBool::new(false),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl RunMonitor for BarMonitor {
    fn set_max_progress(&self, max: u64) {
        self.bar.set_position(0);
        self.bar.set_length(max);
    }

    fn increase_progress(&self) {
        self.bar.inc(1);
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }
}

fn read_accession_list(path: &Path) -> Result<HashSet<String>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

pub fn process_matches(
    path: PathBuf,
    analysis: &AnalysisConfig,
    output: &OutputConfig,
) -> Result<(), CliError> {
    info!("Loading quant matches from {:?}", path);
    let st = Instant::now();
    let input = QuantInput::from_file(&path)?;
    info!(
        "Loaded {} matches over {} samples in {:?}",
        input.matches.len(),
        input.samples.len(),
        st.elapsed()
    );

    let mut settings = analysis.normalization.clone();
    if let Some(ref seed_path) = analysis.seed_list {
        let seeds = read_accession_list(seed_path)?;
        info!("Loaded {} seed accessions from {:?}", seeds.len(), seed_path);
        settings.seeds = Some(seeds);
    }
    if let Some(ref contaminant_path) = analysis.contaminant_list {
        let contaminants = read_accession_list(contaminant_path)?;
        info!(
            "Loaded {} contaminant accessions from {:?}",
            contaminants.len(),
            contaminant_path
        );
        settings.contaminants = Some(contaminants);
    }

    let (samples, collections) = input.into_collections();
    let mut normalizer = Normalizer::new(settings, samples.clone());
    if let Some(num_threads) = analysis.num_threads {
        normalizer = normalizer.with_num_threads(num_threads);
    }

    let monitor = Arc::new(BarMonitor::new());
    let ctx = RunContext {
        monitor: monitor.clone(),
        ..RunContext::default()
    };

    let st = Instant::now();
    let summary = normalizer.normalize_run(&collections, &ctx)?;
    monitor.finish();
    let elapsed = st.elapsed();
    let throughput = collections.len() as f64 / elapsed.as_secs_f64();
    info!(
        "Normalizing {} matches took: {:?} throughput: {:#.1}/s",
        collections.len(),
        elapsed,
        throughput
    );

    let factor_path = output.directory.join("normalization_factors.csv");
    let rows = factor_rows(&summary, &samples);
    write_factor_table(&factor_path, &rows)?;
    info!("Wrote {} factor rows to {:?}", rows.len(), factor_path);

    let ratio_path = output.directory.join("normalized_ratios.csv");
    let ratio_rows = apply_factors(&collections, &summary.factors, &samples);
    write_ratio_table(&ratio_path, &ratio_rows)?;
    info!(
        "Wrote {} normalized ratios to {:?}",
        ratio_rows.len(),
        ratio_path
    );
    Ok(())
}
