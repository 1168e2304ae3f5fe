pub mod direction;
pub mod outcome;
pub mod pubchem;

pub use direction::Direction;
pub use outcome::{BatchStatistics, ConversionOutcome, ConversionRequest};
pub use pubchem::{CidResponse, PropertyResponse};
