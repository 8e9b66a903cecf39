use assert_matches::assert_matches;

use staramr_metadata::domain::{AnalysisId, MetadataEntry, Sample, SampleId, WorkflowId};
use staramr_metadata::error::PostProcessingError;

#[test]
fn sample_json_round_trip() {
    let id: SampleId = "SRR1952908".parse().unwrap();
    let mut sample = Sample::new(id, "Salmonella enterica 908");
    sample.metadata.insert(
        "staramr/gene/0.5.1".to_string(),
        MetadataEntry::text("blaIMP-4, qnrB2", AnalysisId::from(55)),
    );

    let json = serde_json::to_string(&sample).unwrap();
    let parsed: Sample = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, sample);
}

#[test]
fn sample_without_metadata_field_parses() {
    let parsed: Sample = serde_json::from_str(r#"{ "id": "S1", "name": "sample one" }"#).unwrap();
    assert_eq!(parsed.id.as_str(), "S1");
    assert!(parsed.metadata.is_empty());
}

#[test]
fn metadata_entry_shape_is_stable() {
    let entry = MetadataEntry::text("mlst", AnalysisId::from(7));
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["value"], "mlst");
    assert_eq!(json["entry_type"], "text");
    assert_eq!(json["analysis"], 7);
    assert!(json["created_at"].as_str().unwrap().contains('T'));
}

#[test]
fn identifier_parsing() {
    let sample: SampleId = " SRR1952908 ".parse().unwrap();
    assert_eq!(sample.as_str(), "SRR1952908");

    let err = "bad/id".parse::<SampleId>().unwrap_err();
    assert_matches!(err, PostProcessingError::InvalidSampleId(_));

    let workflow: WorkflowId = "4EF5A1AD-435F-4835-B289-DEDDF0C3F98E".parse().unwrap();
    assert_eq!(workflow.to_string(), "4ef5a1ad-435f-4835-b289-deddf0c3f98e");

    let analysis: AnalysisId = "101".parse().unwrap();
    assert_eq!(analysis.value(), 101);
}
