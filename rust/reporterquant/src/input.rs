use crate::errors::{
    QuantError,
    Result,
};
use crate::models::{
    MatchKind,
    QuantMatch,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::Path;
use std::sync::Arc;

/// On-disk quantification input: the configured sample ids plus every
/// identification match with its raw reporter ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantInput {
    pub samples: Vec<String>,
    pub matches: Vec<QuantMatch>,
}

impl QuantInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| QuantError::Io {
            source: e,
            path: Some(path.to_path_buf()),
        })?;
        let reader = std::io::BufReader::new(file);
        let input: QuantInput = serde_json::from_reader(reader)?;
        Ok(input)
    }

    /// Split the flat match list into per-level collections.
    pub fn into_collections(self) -> (Vec<String>, MatchCollections) {
        let mut collections = MatchCollections::default();
        for m in self.matches {
            let m = Arc::new(m);
            match m.kind {
                MatchKind::Psm => collections.psms.push(m),
                MatchKind::Peptide => collections.peptides.push(m),
                MatchKind::Protein => collections.proteins.push(m),
            }
        }
        (self.samples, collections)
    }
}

/// Matches grouped by identification level, shared cheaply with the
/// collector threads.
#[derive(Debug, Default, Clone)]
pub struct MatchCollections {
    pub psms: Vec<Arc<QuantMatch>>,
    pub peptides: Vec<Arc<QuantMatch>>,
    pub proteins: Vec<Arc<QuantMatch>>,
}

impl MatchCollections {
    pub fn of(&self, kind: MatchKind) -> &[Arc<QuantMatch>] {
        match kind {
            MatchKind::Psm => &self.psms,
            MatchKind::Peptide => &self.peptides,
            MatchKind::Protein => &self.proteins,
        }
    }

    pub fn len(&self) -> usize {
        self.psms.len() + self.peptides.len() + self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
