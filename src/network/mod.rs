//! Network provider subsystem.
//!
//! # Data Flow
//! ```text
//! WhisperConfig.networks (chain key → descriptor)
//!     → registry.rs (lazy handle creation, one per chain)
//!     → facades (balance / transaction / contract calls)
//! ```

pub mod registry;

pub use registry::{ProviderHandle, ProviderRegistry};
