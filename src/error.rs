use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use crate::domain::{AnalysisId, SampleId, WorkflowId};

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("missing header row in staramr report [{path}]")]
    MissingHeader { path: Utf8PathBuf },

    #[error("invalid number of columns in staramr report [{path}]: expected [{expected}] got [{found}]")]
    Columns {
        path: Utf8PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("missing result row in staramr report [{path}]")]
    MissingDataRow { path: Utf8PathBuf },

    #[error("invalid number of results in staramr report [{path}]: expected one result row but got multiple")]
    MultipleRows { path: Utf8PathBuf },

    #[error("failed to read staramr report [{path}]")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn is_schema(&self) -> bool {
        !matches!(self, ReportError::Io { .. })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum PostProcessingError {
    #[error("expected one sample, got [{found}] for analysis [{analysis}]")]
    SampleCardinality { found: usize, analysis: AnalysisId },

    #[error("workflow [{workflow}] is not registered")]
    WorkflowNotFound { workflow: WorkflowId },

    #[error("analysis [{analysis}] has no output file named [{name}]")]
    MissingOutputFile { analysis: AnalysisId, name: String },

    #[error("error parsing staramr results [{path}]")]
    Report {
        path: Utf8PathBuf,
        #[source]
        source: ReportError,
    },

    #[error("no updater registered for analysis type [{0}]")]
    UnknownAnalysisType(String),

    #[error("sample [{sample}] not found in store")]
    SampleNotFound { sample: SampleId },

    #[error("failed to persist metadata for sample [{sample}]: {message}")]
    Storage { sample: SampleId, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("missing workflow registry file workflows.json in current directory")]
    MissingRegistry,

    #[error("failed to read workflow registry [{path}]: {message}")]
    RegistryConfig { path: Utf8PathBuf, message: String },

    #[error("invalid metadata key [{0}]")]
    InvalidMetadataKey(String),

    #[error("invalid sample id: {0}")]
    InvalidSampleId(String),

    #[error("invalid analysis id: {0}")]
    InvalidAnalysisId(String),

    #[error("invalid workflow id: {0}")]
    InvalidWorkflowId(String),
}
