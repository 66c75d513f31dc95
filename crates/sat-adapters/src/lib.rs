//! Infrastructure adapters for SAT.
//!
//! This crate implements the ports defined in `sat-core::application::ports`.
//! It contains all disk I/O and the compiled-in plugin implementations.

pub mod discovery;
pub mod filesystem;
pub mod plugins;
pub mod registry;

// Re-export commonly used adapters
pub use discovery::{DiscoveredPlugin, PluginDiscovery, PluginStatus};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use registry::StaticRegistry;
