//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WhisperConfig (validated, immutable)
//!     → shared via Arc to registry and facades
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::WhisperConfig;
pub use schema::NetworkDescriptor;
pub use schema::MessagingConfig;
pub use schema::RpcConfig;
