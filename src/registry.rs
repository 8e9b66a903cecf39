use std::collections::HashMap;

use crate::domain::{Analysis, AnalysisType, Sample};
use crate::error::PostProcessingError;

pub trait SampleUpdater: Send + Sync {
    fn analysis_type(&self) -> &AnalysisType;

    fn update(
        &self,
        samples: Vec<Sample>,
        analysis: &Analysis,
    ) -> Result<Sample, PostProcessingError>;
}

#[derive(Default)]
pub struct UpdaterRegistry {
    updaters: HashMap<AnalysisType, Box<dyn SampleUpdater>>,
}

impl UpdaterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, updater: Box<dyn SampleUpdater>) {
        self.updaters.insert(updater.analysis_type().clone(), updater);
    }

    pub fn get(&self, analysis_type: &AnalysisType) -> Option<&dyn SampleUpdater> {
        self.updaters.get(analysis_type).map(Box::as_ref)
    }

    pub fn analysis_types(&self) -> impl Iterator<Item = &AnalysisType> {
        self.updaters.keys()
    }

    pub fn dispatch(
        &self,
        analysis_type: &AnalysisType,
        samples: Vec<Sample>,
        analysis: &Analysis,
    ) -> Result<Sample, PostProcessingError> {
        let updater = self.get(analysis_type).ok_or_else(|| {
            PostProcessingError::UnknownAnalysisType(analysis_type.to_string())
        })?;
        updater.update(samples, analysis)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::domain::AnalysisId;

    struct StubUpdater {
        analysis_type: AnalysisType,
    }

    impl SampleUpdater for StubUpdater {
        fn analysis_type(&self) -> &AnalysisType {
            &self.analysis_type
        }

        fn update(
            &self,
            mut samples: Vec<Sample>,
            _analysis: &Analysis,
        ) -> Result<Sample, PostProcessingError> {
            Ok(samples.remove(0))
        }
    }

    fn analysis() -> Analysis {
        let workflow = "4ef5a1ad-435f-4835-b289-deddf0c3f98e".parse().unwrap();
        Analysis::new(AnalysisId::from(1), workflow)
    }

    #[test]
    fn dispatches_to_registered_updater() {
        let mut registry = UpdaterRegistry::new();
        registry.register(Box::new(StubUpdater {
            analysis_type: AnalysisType::new("STAR_AMR"),
        }));

        let sample = Sample::new("S1".parse().unwrap(), "sample one");
        let updated = registry
            .dispatch(&AnalysisType::new("STAR_AMR"), vec![sample], &analysis())
            .unwrap();
        assert_eq!(updated.name, "sample one");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let registry = UpdaterRegistry::new();

        let err = registry
            .dispatch(&AnalysisType::new("SISTR"), Vec::new(), &analysis())
            .unwrap_err();
        assert_matches!(err, PostProcessingError::UnknownAnalysisType(tag) if tag == "SISTR");
    }

    #[test]
    fn reregistration_replaces_updater() {
        let mut registry = UpdaterRegistry::new();
        registry.register(Box::new(StubUpdater {
            analysis_type: AnalysisType::new("STAR_AMR"),
        }));
        registry.register(Box::new(StubUpdater {
            analysis_type: AnalysisType::new("STAR_AMR"),
        }));

        assert_eq!(registry.analysis_types().count(), 1);
        assert!(registry.get(&AnalysisType::new("STAR_AMR")).is_some());
    }
}
