use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

use crate::domain::{Sample, SampleId, SampleMetadata};
use crate::error::PostProcessingError;

pub trait SampleService: Send + Sync {
    fn update_metadata(
        &self,
        id: &SampleId,
        metadata: &SampleMetadata,
    ) -> Result<(), PostProcessingError>;
}

#[derive(Debug, Clone)]
pub struct SampleStore {
    root: Utf8PathBuf,
}

impl SampleStore {
    pub fn new() -> Result<Self, PostProcessingError> {
        let root = BaseDirs::new()
            .and_then(|dirs| {
                Utf8PathBuf::from_path_buf(dirs.data_dir().join("staramr-metadata")).ok()
            })
            .ok_or_else(|| {
                PostProcessingError::Filesystem("unable to resolve data directory".to_string())
            })?;
        Ok(Self { root })
    }

    pub fn new_with_root(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn sample_path(&self, id: &SampleId) -> Utf8PathBuf {
        self.root
            .join("samples")
            .join(format!("{}.json", id.as_str()))
    }

    pub fn contains(&self, id: &SampleId) -> bool {
        self.sample_path(id).as_std_path().exists()
    }

    pub fn load(&self, id: &SampleId) -> Result<Sample, PostProcessingError> {
        let path = self.sample_path(id);
        if !path.as_std_path().exists() {
            return Err(PostProcessingError::SampleNotFound { sample: id.clone() });
        }
        let content =
            fs::read_to_string(path.as_std_path()).map_err(|err| PostProcessingError::Storage {
                sample: id.clone(),
                message: err.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|err| PostProcessingError::Storage {
            sample: id.clone(),
            message: err.to_string(),
        })
    }

    pub fn save(&self, sample: &Sample) -> Result<(), PostProcessingError> {
        let path = self.sample_path(&sample.id);
        let storage_err = |message: String| PostProcessingError::Storage {
            sample: sample.id.clone(),
            message,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent.as_std_path()).map_err(|err| storage_err(err.to_string()))?;
        }
        let tmp_path = path.with_extension("json.tmp");
        let content =
            serde_json::to_vec_pretty(sample).map_err(|err| storage_err(err.to_string()))?;
        fs::write(tmp_path.as_std_path(), &content)
            .map_err(|err| storage_err(err.to_string()))?;
        fs::rename(tmp_path.as_std_path(), path.as_std_path())
            .map_err(|err| storage_err(err.to_string()))?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Sample>, PostProcessingError> {
        let samples_root = self.root.join("samples");
        if !samples_root.as_std_path().exists() {
            return Ok(Vec::new());
        }

        let mut samples = Vec::new();
        let entries = fs::read_dir(samples_root.as_std_path())
            .map_err(|err| PostProcessingError::Filesystem(err.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|err| PostProcessingError::Filesystem(err.to_string()))?;
            let path = entry.path();
            if !path.is_file() || path.extension().map(|ext| ext == "json") != Some(true) {
                continue;
            }
            let content = fs::read_to_string(&path)
                .map_err(|err| PostProcessingError::Filesystem(err.to_string()))?;
            let sample: Sample = serde_json::from_str(&content)
                .map_err(|err| PostProcessingError::Filesystem(err.to_string()))?;
            samples.push(sample);
        }
        samples.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(samples)
    }
}

impl SampleService for SampleStore {
    fn update_metadata(
        &self,
        id: &SampleId,
        metadata: &SampleMetadata,
    ) -> Result<(), PostProcessingError> {
        let mut sample = self.load(id)?;
        sample.metadata = metadata.clone();
        self.save(&sample)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    use super::*;
    use crate::domain::{AnalysisId, MetadataEntry};

    fn store_in(dir: &tempfile::TempDir) -> SampleStore {
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        SampleStore::new_with_root(root)
    }

    #[test]
    fn sample_path_layout() {
        let store = SampleStore::new_with_root(Utf8PathBuf::from("/data/amr"));
        let id: SampleId = "SRR1952908".parse().unwrap();

        assert_eq!(
            store.sample_path(&id).as_str(),
            "/data/amr/samples/SRR1952908.json"
        );
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let id: SampleId = "SRR1952908".parse().unwrap();
        let mut sample = Sample::new(id.clone(), "Salmonella enterica 908");
        sample.metadata.insert(
            "staramr/gene/0.5.1".to_string(),
            MetadataEntry::text("blaIMP-4", AnalysisId::from(3)),
        );

        store.save(&sample).unwrap();
        assert!(store.contains(&id));

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn load_missing_sample_fails() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let id: SampleId = "absent".parse().unwrap();

        let err = store.load(&id).unwrap_err();
        assert_matches!(err, PostProcessingError::SampleNotFound { .. });
    }

    #[test]
    fn update_metadata_persists_replacement() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let id: SampleId = "S1".parse().unwrap();
        store.save(&Sample::new(id.clone(), "sample one")).unwrap();

        let mut metadata = SampleMetadata::new();
        metadata.insert(
            "staramr/scheme/0.5.1".to_string(),
            MetadataEntry::text("mlst", AnalysisId::from(7)),
        );
        store.update_metadata(&id, &metadata).unwrap();

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded.name, "sample one");
        assert_eq!(loaded.metadata, metadata);
    }

    #[test]
    fn update_metadata_requires_existing_sample() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let id: SampleId = "ghost".parse().unwrap();

        let err = store.update_metadata(&id, &SampleMetadata::new()).unwrap_err();
        assert_matches!(err, PostProcessingError::SampleNotFound { .. });
    }

    #[test]
    fn list_returns_sorted_samples() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        for name in ["beta", "alpha"] {
            let id: SampleId = name.parse().unwrap();
            store.save(&Sample::new(id, name)).unwrap();
        }

        let samples = store.list().unwrap();
        let ids: Vec<&str> = samples.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[test]
    fn list_empty_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
    }
}
