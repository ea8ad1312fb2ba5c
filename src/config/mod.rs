//! Configuration loading and types.

pub mod env;
pub mod types;

pub use env::load_config;
pub use types::*;
