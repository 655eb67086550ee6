pub mod mongo_data;

pub use mongo_data::*;
