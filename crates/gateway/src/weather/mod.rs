mod codes;
mod models;
pub mod normalize;

pub use codes::{categorize, describe, Category};
pub use models::*;
pub use normalize::Error;
