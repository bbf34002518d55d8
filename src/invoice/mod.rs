//! Invoice module containing line resolution, discounting and totals

pub mod discount;
pub mod engine;
pub mod request;
pub mod resolver;
pub mod totals;

pub use discount::*;
pub use engine::*;
pub use request::*;
pub use resolver::*;
pub use totals::*;
