use std::collections::HashMap;

use crate::domain::{AnalysisId, MetadataEntry, SampleMetadata};
use crate::error::PostProcessingError;
use crate::report::AmrSummary;

pub const GENE_KEY: &str = "staramr/gene";
pub const DRUG_CLASS_KEY: &str = "staramr/drug-class";
pub const QUALITY_MODULE_KEY: &str = "staramr/quality-module";
pub const PLASMID_KEY: &str = "staramr/plasmid";
pub const SCHEME_KEY: &str = "staramr/scheme";
pub const SEQUENCE_TYPE_KEY: &str = "staramr/sequence-type";
pub const GENOME_LENGTH_KEY: &str = "staramr/genome-length";
pub const N50_KEY: &str = "staramr/N50";
pub const NUM_CONTIGS_KEY: &str = "staramr/num-contigs";
pub const QUALITY_MODULE_FEEDBACK_KEY: &str = "staramr/quality-module-feedback";

pub fn versioned_key(name: &str, version: &str) -> String {
    format!("{name}/{version}")
}

pub fn summary_entries(
    summary: &AmrSummary,
    version: &str,
    analysis: AnalysisId,
) -> HashMap<String, MetadataEntry> {
    let fields = [
        (GENE_KEY, summary.genotype.as_str()),
        (DRUG_CLASS_KEY, summary.drug_class.as_str()),
        (QUALITY_MODULE_KEY, summary.quality_module.as_str()),
        (PLASMID_KEY, summary.plasmid.as_str()),
        (SCHEME_KEY, summary.scheme.as_str()),
        (SEQUENCE_TYPE_KEY, summary.sequence_type.as_str()),
        (GENOME_LENGTH_KEY, summary.genome_length.as_str()),
        (N50_KEY, summary.n50.as_str()),
        (NUM_CONTIGS_KEY, summary.num_contigs.as_str()),
        (
            QUALITY_MODULE_FEEDBACK_KEY,
            summary.quality_module_feedback.as_str(),
        ),
    ];

    let mut entries = HashMap::with_capacity(fields.len());
    for (name, value) in fields {
        entries.insert(
            versioned_key(name, version),
            MetadataEntry::text(value, analysis),
        );
    }
    entries
}

pub trait MetadataService: Send + Sync {
    fn resolve_and_merge(
        &self,
        existing: &SampleMetadata,
        entries: HashMap<String, MetadataEntry>,
    ) -> Result<SampleMetadata, PostProcessingError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRegistry;

impl FieldRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataService for FieldRegistry {
    fn resolve_and_merge(
        &self,
        existing: &SampleMetadata,
        entries: HashMap<String, MetadataEntry>,
    ) -> Result<SampleMetadata, PostProcessingError> {
        for key in entries.keys() {
            if key.trim().is_empty() {
                return Err(PostProcessingError::InvalidMetadataKey(key.clone()));
            }
        }

        let mut merged = existing.clone();
        merged.extend(entries);
        Ok(merged)
    }
}
