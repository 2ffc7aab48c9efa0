//! Cumulative (stacked) yield models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TrialRecord;
use crate::types::RipenessStage;

/// A stage row of the cumulative-yield dataset, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StageRow {
    pub variety: String,
    #[serde(default)]
    pub breeder: Option<String>,
    #[serde(rename = "érett", default)]
    pub ripe: Option<f64>,
    #[serde(rename = "sárga", default)]
    pub yellow: Option<f64>,
    #[serde(rename = "zöld", default)]
    pub green: Option<f64>,
    #[serde(rename = "romló", default)]
    pub decaying: Option<f64>,
}

/// Cumulative dataset: trial-location name → stage rows
pub type CumulativeDataset = BTreeMap<String, Vec<StageRow>>;

/// The four ripeness-stage quantities of one variety (t/ha)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct StageQuantities {
    #[serde(rename = "érett")]
    pub ripe: f64,
    #[serde(rename = "sárga")]
    pub yellow: f64,
    #[serde(rename = "zöld")]
    pub green: f64,
    #[serde(rename = "romló")]
    pub decaying: f64,
}

impl StageQuantities {
    pub fn get(&self, stage: RipenessStage) -> f64 {
        match stage {
            RipenessStage::Ripe => self.ripe,
            RipenessStage::Yellow => self.yellow,
            RipenessStage::Green => self.green,
            RipenessStage::Decaying => self.decaying,
        }
    }

    pub fn sum(&self) -> f64 {
        self.ripe + self.yellow + self.green + self.decaying
    }

    pub fn to_array(&self) -> [f64; 4] {
        RipenessStage::ALL.map(|stage| self.get(stage))
    }
}

/// Stage quantities with their derived total.
///
/// `total` is filled in by [`CumulativeRecord::new`] and has no setter, so it
/// cannot drift from the stage values. Output only, no `Deserialize`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CumulativeRecord {
    pub variety: String,
    pub breeder: String,
    #[serde(flatten)]
    pub stages: StageQuantities,
    total: f64,
}

impl CumulativeRecord {
    pub fn new(variety: impl Into<String>, breeder: impl Into<String>, stages: StageQuantities) -> Self {
        Self {
            variety: variety.into(),
            breeder: breeder.into(),
            total: stages.sum(),
            stages,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

impl TrialRecord for CumulativeRecord {
    fn variety(&self) -> &str {
        &self.variety
    }

    fn breeder(&self) -> &str {
        &self.breeder
    }

    fn set_breeder(&mut self, breeder: String) {
        self.breeder = breeder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_row_uses_dataset_field_names() {
        let json = r#"{"variety": "N00530-I", "breeder": "BASF-Nunhems", "érett": 50.5, "zöld": 3}"#;
        let row: StageRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.ripe, Some(50.5));
        assert_eq!(row.green, Some(3.0));
        assert_eq!(row.yellow, None);
    }

    #[test]
    fn test_cumulative_record_serializes_total() {
        let record = CumulativeRecord::new(
            "H2239-I",
            "Waller + Heinz",
            StageQuantities {
                ripe: 3.0,
                yellow: 1.0,
                green: 0.0,
                decaying: 2.0,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["total"], 6.0);
        assert_eq!(value["érett"], 3.0);
        assert_eq!(record.total(), 6.0);
    }
}
