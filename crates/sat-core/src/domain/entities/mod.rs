pub mod build_plan;
pub mod common;
pub mod manifest;

pub use crate::domain::DomainError;
pub use build_plan::{BuildPlan, PluginRequirement};
pub use manifest::{DeclaredPaths, Entrypoint, Manifest};
