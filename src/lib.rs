pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{from_mapping, into_mapping, Model, Validator, WireMapping};
pub use domain::model::{File, Project, Scan, Session};
pub use domain::quality::ScanQuality;
pub use domain::unknown::Maybe;
pub use utils::error::{ModelError, Result};
