mod match_item;
mod validation;

pub use match_item::{
    MatchKind,
    QuantMatch,
};
pub use validation::ValidationLevel;
