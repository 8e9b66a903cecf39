use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PostProcessingError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisType(String);

impl AnalysisType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleId(String);

impl SampleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SampleId {
    type Err = PostProcessingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let allowed = trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        let has_substance = trimmed.chars().any(|ch| ch.is_ascii_alphanumeric());
        if trimmed.is_empty() || !allowed || !has_substance {
            return Err(PostProcessingError::InvalidSampleId(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(i64);

impl AnalysisId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AnalysisId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalysisId {
    type Err = PostProcessingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| PostProcessingError::InvalidAnalysisId(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkflowId {
    type Err = PostProcessingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| PostProcessingError::InvalidWorkflowId(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub value: String,
    pub entry_type: String,
    pub analysis: AnalysisId,
    pub created_at: String,
}

impl MetadataEntry {
    pub fn text(value: impl Into<String>, analysis: AnalysisId) -> Self {
        Self {
            value: value.into(),
            entry_type: "text".to_string(),
            analysis,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub type SampleMetadata = BTreeMap<String, MetadataEntry>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub name: String,
    #[serde(default)]
    pub metadata: SampleMetadata,
}

impl Sample {
    pub fn new(id: SampleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            metadata: SampleMetadata::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub id: AnalysisId,
    pub workflow_id: WorkflowId,
    output_files: HashMap<String, Utf8PathBuf>,
}

impl Analysis {
    pub fn new(id: AnalysisId, workflow_id: WorkflowId) -> Self {
        Self {
            id,
            workflow_id,
            output_files: HashMap::new(),
        }
    }

    pub fn add_output_file(&mut self, name: impl Into<String>, path: Utf8PathBuf) {
        self.output_files.insert(name.into(), path);
    }

    pub fn output_file(&self, name: &str) -> Option<&Utf8Path> {
        self.output_files.get(name).map(Utf8PathBuf::as_path)
    }
}
