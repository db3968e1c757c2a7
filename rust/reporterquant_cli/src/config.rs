use reporterquant::NormalizationSettings;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InputConfig {
    #[serde(rename = "matches")]
    Matches { path: PathBuf },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub normalization: NormalizationSettings,
    #[serde(default)]
    pub num_threads: Option<usize>,
    /// Newline-delimited accession list of stable seed proteins.
    /// Over-writes any seed set given inline in `normalization`.
    #[serde(default)]
    pub seed_list: Option<PathBuf>,
    /// Newline-delimited accession list of contaminants to exclude.
    #[serde(default)]
    pub contaminant_list: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
}
