//! Configuration system for pathkit.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `pathkit.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHKIT_*`)
//! 3. Explicit files (via `ConfigBuilder::with_file`)
//! 4. Project config (`pathkit.yaml`, nearest ancestor wins)
//! 5. User config (`~/.pathkit/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use pathkit::config::ConfigBuilder;
//! use pathkit::cwd::FsContext;
//! use pathkit::ops::CopyOptions;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let ctx = FsContext::from_config(&config).unwrap();
//! let copy = config.copy.as_ref().map(CopyOptions::from).unwrap_or_default();
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, CopyConfig};
pub use validator::ConfigValidator;
