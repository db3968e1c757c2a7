use crate::apply::NormalizedRatioRow;
use crate::errors::{
    QuantError,
    Result,
};
use crate::normalization::RunSummary;
use serde::Serialize;
use std::path::Path;

/// One line of the factor table: the factor plus the pool sizes it was
/// derived from.
#[derive(Debug, Clone, Serialize)]
pub struct FactorRow {
    pub level: &'static str,
    pub sample: String,
    pub factor: f64,
    pub n_all: usize,
    pub n_seed: usize,
}

pub fn factor_rows(summary: &RunSummary, samples: &[String]) -> Vec<FactorRow> {
    let mut rows = Vec::new();
    for level in &summary.levels {
        for sample in samples {
            let n_all = level
                .pools
                .ratios
                .all
                .get(sample)
                .map(Vec::len)
                .unwrap_or(0);
            let n_seed = level
                .pools
                .ratios
                .seed
                .get(sample)
                .map(Vec::len)
                .unwrap_or(0);
            rows.push(FactorRow {
                level: level.kind.as_str(),
                sample: sample.clone(),
                factor: summary.factors.factor(level.kind, sample),
                n_all,
                n_seed,
            });
        }
    }
    rows
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| QuantError::TableWriting {
        msg: e.to_string(),
        path: path.to_path_buf(),
    })?;
    for row in rows {
        writer.serialize(row).map_err(|e| QuantError::TableWriting {
            msg: e.to_string(),
            path: path.to_path_buf(),
        })?;
    }
    writer.flush().map_err(|e| QuantError::TableWriting {
        msg: e.to_string(),
        path: path.to_path_buf(),
    })?;
    Ok(())
}

pub fn write_factor_table(path: &Path, rows: &[FactorRow]) -> Result<()> {
    write_table(path, rows)
}

pub fn write_ratio_table(path: &Path, rows: &[NormalizedRatioRow]) -> Result<()> {
    write_table(path, rows)
}
