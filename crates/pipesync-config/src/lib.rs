//! KDL configuration for pipesync.
//!
//! This crate handles parsing of the mapper options (`pipesync.kdl`).

pub mod error;
pub mod mapper;

pub use error::{ConfigError, ConfigResult};
pub use mapper::{MapperConfig, load_mapper_config, parse_mapper_config};
