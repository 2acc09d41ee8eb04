use serde::Serialize;

use gdl_source::StrategyKind;

use crate::dataset::DatasetName;
use crate::error::LoadError;

/// A dataset that was published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub dataset: DatasetName,
    pub entries: usize,
    /// The strategy that produced the document.
    pub strategy: StrategyKind,
    pub origin: String,
    /// `true` when the first strategy in the chain did not succeed.
    pub fallback: bool,
}

/// Outcome of one [`DataLoader::load`](crate::DataLoader::load).
///
/// Both lists are in dataset declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<DatasetSummary>,
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    pub fn success_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no dataset failed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, dataset: DatasetName) -> Option<&LoadError> {
        self.errors.iter().find(|e| e.dataset == dataset)
    }

    pub fn summary_for(&self, dataset: DatasetName) -> Option<&DatasetSummary> {
        self.loaded.iter().find(|s| s.dataset == dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadStage;

    #[test]
    fn counts() {
        let report = LoadReport {
            loaded: vec![DatasetSummary {
                dataset: DatasetName::Tiles,
                entries: 3,
                strategy: StrategyKind::Embedded,
                origin: "embedded Tiles.xml".into(),
                fallback: true,
            }],
            errors: vec![LoadError::new(
                DatasetName::Servers,
                LoadStage::ExhaustedChain,
                "no cache",
            )],
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_complete());
        assert!(report.error_for(DatasetName::Servers).is_some());
        assert!(report.error_for(DatasetName::Tiles).is_none());
        assert_eq!(report.summary_for(DatasetName::Tiles).unwrap().entries, 3);
    }

    #[test]
    fn empty_report_is_complete() {
        assert!(LoadReport::default().is_complete());
    }

    #[test]
    fn serializes_to_json() {
        let report = LoadReport {
            loaded: vec![],
            errors: vec![LoadError::new(DatasetName::Packets, LoadStage::Decode, "bad id")],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["errors"][0]["dataset"], "Packets");
        assert_eq!(json["errors"][0]["stage"], "decode");
    }
}
