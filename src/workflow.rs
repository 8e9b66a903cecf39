use std::collections::HashMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::domain::WorkflowId;
use crate::error::PostProcessingError;

pub trait WorkflowService: Send + Sync {
    fn resolve_version(&self, id: &WorkflowId) -> Result<String, PostProcessingError>;
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub workflows: Vec<WorkflowEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WorkflowEntry {
    pub id: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDescription {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowRegistry {
    workflows: HashMap<WorkflowId, WorkflowDescription>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(path: Option<&Utf8Path>) -> Result<Self, PostProcessingError> {
        let registry_path = match path {
            Some(path) => path.to_owned(),
            None => Utf8PathBuf::from("workflows.json"),
        };

        if path.is_none() && !registry_path.as_std_path().exists() {
            return Err(PostProcessingError::MissingRegistry);
        }

        let content = fs::read_to_string(registry_path.as_std_path()).map_err(|err| {
            PostProcessingError::RegistryConfig {
                path: registry_path.clone(),
                message: err.to_string(),
            }
        })?;
        let file: RegistryFile =
            serde_json::from_str(&content).map_err(|err| PostProcessingError::RegistryConfig {
                path: registry_path.clone(),
                message: err.to_string(),
            })?;

        Self::resolve_file(file)
    }

    pub fn resolve_file(file: RegistryFile) -> Result<Self, PostProcessingError> {
        let mut registry = Self::new();
        for entry in file.workflows {
            let id: WorkflowId = entry.id.parse()?;
            registry.register(id, entry.name, entry.version);
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        id: WorkflowId,
        name: impl Into<String>,
        version: impl Into<String>,
    ) {
        self.workflows.insert(
            id,
            WorkflowDescription {
                name: name.into(),
                version: version.into(),
            },
        );
    }

    pub fn description(&self, id: &WorkflowId) -> Option<&WorkflowDescription> {
        self.workflows.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WorkflowId, &WorkflowDescription)> {
        self.workflows.iter()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

impl WorkflowService for WorkflowRegistry {
    fn resolve_version(&self, id: &WorkflowId) -> Result<String, PostProcessingError> {
        self.workflows
            .get(id)
            .map(|workflow| workflow.version.clone())
            .ok_or(PostProcessingError::WorkflowNotFound { workflow: *id })
    }
}
