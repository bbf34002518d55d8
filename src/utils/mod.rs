//! Utility modules

pub mod lenient;
pub mod number;
pub mod validation;

pub use number::*;
pub use validation::*;
