use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PluginId;

/// One entry of a build plan: a plugin and whether the build needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequirement {
    pub id: PluginId,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl PluginRequirement {
    pub fn required(id: PluginId) -> Self {
        Self { id, required: true }
    }

    pub fn optional(id: PluginId) -> Self {
        Self {
            id,
            required: false,
        }
    }
}

/// Ordered list of plugins whose defaults make up the archive configuration.
///
/// Order is significant: later entries override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    entries: Vec<PluginRequirement>,
}

impl BuildPlan {
    pub fn new(entries: Vec<PluginRequirement>) -> Self {
        Self { entries }
    }

    pub fn require(mut self, id: PluginId) -> Self {
        self.entries.push(PluginRequirement::required(id));
        self
    }

    pub fn optional(mut self, id: PluginId) -> Self {
        self.entries.push(PluginRequirement::optional(id));
        self
    }

    pub fn entries(&self) -> &[PluginRequirement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PluginRequirement> for BuildPlan {
    fn from_iter<T: IntoIterator<Item = PluginRequirement>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
