//! Request/response models

pub mod disease;
pub mod prediction;

pub use disease::*;
pub use prediction::*;
