pub mod pagination;
pub mod validation;

pub use pagination::SkipTake;
pub use validation::*;
