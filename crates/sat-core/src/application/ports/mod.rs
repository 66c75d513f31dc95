//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sat-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: reading manifests and defaults, writing the built configuration
//!   - `EntrypointRegistry`: binding a declared entrypoint to executable code

pub mod output;

pub use output::{EntrypointRegistry, Filesystem};

#[cfg(test)]
pub use output::MockEntrypointRegistry;
