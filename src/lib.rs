pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{OzonClient, TimeworldSource};
pub use crate::config::CliConfig;
pub use crate::core::{etl::SyncEngine, pipeline::SyncPipeline};
pub use crate::utils::error::{Result, SyncError};
