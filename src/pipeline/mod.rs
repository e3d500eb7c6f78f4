//! Pipeline composition and execution for design matrices.

mod config;
mod runner;

pub use config::DesignConfig;
pub use runner::{run_config, DesignOutcome, Pipeline};
