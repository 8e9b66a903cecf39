use crate::domain::{Analysis, AnalysisType, Sample};
use crate::error::PostProcessingError;
use crate::metadata::{self, MetadataService};
use crate::registry::SampleUpdater;
use crate::report;
use crate::sample::SampleService;
use crate::workflow::WorkflowService;

pub const STAR_AMR: &str = "STAR_AMR";
pub const STARAMR_SUMMARY: &str = "staramr-summary.tsv";
pub const DEFAULT_WORKFLOW_ID: &str = "4ef5a1ad-435f-4835-b289-deddf0c3f98e";

pub struct StarAmrUpdater<W, M, S> {
    analysis_type: AnalysisType,
    workflows: W,
    metadata: M,
    samples: S,
}

impl<W: WorkflowService, M: MetadataService, S: SampleService> StarAmrUpdater<W, M, S> {
    pub fn new(workflows: W, metadata: M, samples: S) -> Self {
        Self {
            analysis_type: AnalysisType::new(STAR_AMR),
            workflows,
            metadata,
            samples,
        }
    }

    pub fn update(
        &self,
        mut samples: Vec<Sample>,
        analysis: &Analysis,
    ) -> Result<Sample, PostProcessingError> {
        if samples.len() != 1 {
            return Err(PostProcessingError::SampleCardinality {
                found: samples.len(),
                analysis: analysis.id,
            });
        }
        let mut sample = samples.remove(0);
        tracing::debug!(analysis = %analysis.id, sample = %sample.id, "updating sample from staramr results");

        let version = self.workflows.resolve_version(&analysis.workflow_id)?;
        let path = analysis.output_file(STARAMR_SUMMARY).ok_or_else(|| {
            PostProcessingError::MissingOutputFile {
                analysis: analysis.id,
                name: STARAMR_SUMMARY.to_string(),
            }
        })?;

        let summary = report::read_summary(path).map_err(|err| {
            tracing::error!(analysis = %analysis.id, path = %path, error = %err, "failed to read staramr results");
            PostProcessingError::Report {
                path: path.to_owned(),
                source: err,
            }
        })?;

        let entries = metadata::summary_entries(&summary, &version, analysis.id);
        let merged = self.metadata.resolve_and_merge(&sample.metadata, entries)?;
        self.samples.update_metadata(&sample.id, &merged)?;
        sample.metadata = merged;

        tracing::debug!(sample = %sample.id, entries = sample.metadata.len(), "sample metadata updated");
        Ok(sample)
    }
}

impl<W: WorkflowService, M: MetadataService, S: SampleService> SampleUpdater
    for StarAmrUpdater<W, M, S>
{
    fn analysis_type(&self) -> &AnalysisType {
        &self.analysis_type
    }

    fn update(
        &self,
        samples: Vec<Sample>,
        analysis: &Analysis,
    ) -> Result<Sample, PostProcessingError> {
        StarAmrUpdater::update(self, samples, analysis)
    }
}
