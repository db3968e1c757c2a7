pub mod apply;
pub mod errors;
pub mod export;
pub mod input;
pub mod models;
pub mod monitor;
pub mod normalization;
pub mod ratio;
pub mod stream;

pub use input::{
    MatchCollections,
    QuantInput,
};
pub use models::{
    MatchKind,
    QuantMatch,
    ValidationLevel,
};
pub use normalization::{
    NormalizationFactors,
    NormalizationMethod,
    NormalizationSettings,
    Normalizer,
    RunContext,
};
