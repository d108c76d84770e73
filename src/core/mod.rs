

pub mod config;
pub mod error;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
