pub mod api;
pub mod core;
pub mod error;

pub use error::{FireError, FireResult};
