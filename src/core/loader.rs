//! Project metadata (project.json) loading

use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::MetadataError;

/// Metadata file that UiPath Studio writes next to the workflows
pub const PROJECT_FILE_NAME: &str = "project.json";

/// Project information from the metadata sidecar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Package name -> version constraint
    pub dependencies: BTreeMap<String, String>,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            description: String::new(),
            version: String::new(),
            dependencies: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawProject {
    name: Option<String>,
    description: Option<String>,
    project_version: Option<String>,
    dependencies: BTreeMap<String, serde_json::Value>,
}

impl ProjectInfo {
    /// Parse project.json content
    pub fn from_json(content: &str) -> Result<Self, MetadataError> {
        let raw: RawProject = serde_json::from_str(content)?;
        let dependencies = raw
            .dependencies
            .into_iter()
            .map(|(name, value)| {
                let version = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (name, version)
            })
            .collect();

        Ok(Self {
            name: raw.name.unwrap_or_else(|| "Unknown".to_string()),
            description: raw.description.unwrap_or_default(),
            version: raw.project_version.unwrap_or_default(),
            dependencies,
        })
    }

    /// Read and parse a project.json file
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Load optional project metadata.
///
/// Metadata is context, not a correctness requirement: a missing, unreadable
/// or malformed file yields the defaults and a warning.
pub fn load_project_info(path: Option<&Path>) -> ProjectInfo {
    let Some(path) = path else {
        return ProjectInfo::default();
    };

    match ProjectInfo::load(path) {
        Ok(info) => info,
        Err(e) => {
            warn!("Ignoring project metadata {}: {}", path.display(), e);
            ProjectInfo::default()
        }
    }
}

/// project.json next to a workflow file, if there is one
pub fn find_project_file(workflow: &Path) -> Option<std::path::PathBuf> {
    let candidate = workflow.parent()?.join(PROJECT_FILE_NAME);
    candidate.is_file().then_some(candidate)
}
