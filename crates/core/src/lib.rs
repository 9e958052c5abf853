//! Shared plumbing for aerocoord tools
//!
//! - **Error handling**: errors with codes, context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults
//! - **Input**: file and stdin reading
//!
//! # Example
//!
//! ```rust,no_run
//! use aerocoord_core::config::Config;
//! use aerocoord_geo::Engine;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let engine = Engine::new(config.schema.engine_config());
//! let analysis = engine.analyze("574706N0614453E");
//! println!("{}", analysis.extremities);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod input;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::input::read_input;
}
