//! Trial measurement records

use serde::{Deserialize, Serialize};

use super::classify;
use crate::types::LocationSlot;

/// A row of the primary (or sugar-content) spreadsheet export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawRecord {
    #[serde(rename = "fajta")]
    pub variety: String,
    /// Which diagram the row belongs to
    #[serde(rename = "diagramhoz", default)]
    pub category: Option<String>,
    #[serde(rename = "M-I.", default)]
    pub m_i: Option<f64>,
    #[serde(rename = "M-II.", default)]
    pub m_ii: Option<f64>,
    #[serde(rename = "Cs-I.", default)]
    pub cs_i: Option<f64>,
    #[serde(rename = "Cs-II.", default)]
    pub cs_ii: Option<f64>,
    #[serde(rename = "L-I.", default)]
    pub l_i: Option<f64>,
    #[serde(rename = "L-II.", default)]
    pub l_ii: Option<f64>,
}

impl RawRecord {
    pub fn yield_at(&self, slot: LocationSlot) -> Option<f64> {
        match slot {
            LocationSlot::MezoberenyI => self.m_i,
            LocationSlot::MezoberenyII => self.m_ii,
            LocationSlot::CsabacsudI => self.cs_i,
            LocationSlot::CsabacsudII => self.cs_ii,
            LocationSlot::LakitelekI => self.l_i,
            LocationSlot::LakitelekII => self.l_ii,
        }
    }
}

/// Primary spreadsheet export: rows live under the sheet name
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrimarySheet {
    #[serde(rename = "Munka1", default)]
    pub rows: Vec<RawRecord>,
}

/// A row of the 50-plant Lakitelek subplot dataset (two harvests only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SubplotRecord {
    #[serde(rename = "fajta")]
    pub variety: String,
    /// `érett` or `romló`; absent on sugar-content rows
    #[serde(rename = "tipus", default)]
    pub kind: Option<String>,
    #[serde(rename = "L-I.", default)]
    pub l_i: Option<f64>,
    #[serde(rename = "L-II.", default)]
    pub l_ii: Option<f64>,
}

/// Values for all six location slots. Absent readings are stored as zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LocationValues {
    #[serde(rename = "M-I", default)]
    pub m_i: f64,
    #[serde(rename = "M-II", default)]
    pub m_ii: f64,
    #[serde(rename = "Cs-I", default)]
    pub cs_i: f64,
    #[serde(rename = "Cs-II", default)]
    pub cs_ii: f64,
    #[serde(rename = "L-I", default)]
    pub l_i: f64,
    #[serde(rename = "L-II", default)]
    pub l_ii: f64,
}

impl LocationValues {
    pub fn get(&self, slot: LocationSlot) -> f64 {
        match slot {
            LocationSlot::MezoberenyI => self.m_i,
            LocationSlot::MezoberenyII => self.m_ii,
            LocationSlot::CsabacsudI => self.cs_i,
            LocationSlot::CsabacsudII => self.cs_ii,
            LocationSlot::LakitelekI => self.l_i,
            LocationSlot::LakitelekII => self.l_ii,
        }
    }

    pub fn set(&mut self, slot: LocationSlot, value: f64) {
        let target = match slot {
            LocationSlot::MezoberenyI => &mut self.m_i,
            LocationSlot::MezoberenyII => &mut self.m_ii,
            LocationSlot::CsabacsudI => &mut self.cs_i,
            LocationSlot::CsabacsudII => &mut self.cs_ii,
            LocationSlot::LakitelekI => &mut self.l_i,
            LocationSlot::LakitelekII => &mut self.l_ii,
        };
        *target = value;
    }

    /// Values in chart category order
    pub fn to_array(&self) -> [f64; 6] {
        LocationSlot::ALL.map(|slot| self.get(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocationSlot, f64)> + '_ {
        LocationSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// A variety's readings for one metric, resolved to its breeder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedRecord {
    pub variety: String,
    pub breeder: String,
    pub locations: LocationValues,
}

impl ProcessedRecord {
    /// Build a record, resolving the breeder through the classifier
    pub fn new(variety: impl Into<String>, locations: LocationValues) -> Self {
        let variety = variety.into();
        let breeder = classify(&variety).to_string();
        Self {
            variety,
            breeder,
            locations,
        }
    }
}

/// Common surface of the record types the grouper and statistics accept
pub trait TrialRecord {
    fn variety(&self) -> &str;
    fn breeder(&self) -> &str;
    fn set_breeder(&mut self, breeder: String);
}

impl TrialRecord for ProcessedRecord {
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
    fn test_raw_record_accepts_missing_and_null_columns() {
        let json = r#"{"fajta": "N00530", "diagramhoz": "x", "M-I.": 4.5, "Cs-II.": null}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.variety, "N00530");
        assert_eq!(record.yield_at(LocationSlot::MezoberenyI), Some(4.5));
        assert_eq!(record.yield_at(LocationSlot::CsabacsudII), None);
        assert_eq!(record.yield_at(LocationSlot::LakitelekII), None);
    }

    #[test]
    fn test_location_values_serialize_all_six_keys() {
        let value = serde_json::to_value(LocationValues::default()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        for slot in LocationSlot::ALL {
            assert_eq!(value[slot.code()], 0.0);
        }
    }

    #[test]
    fn test_location_values_set_and_get() {
        let mut values = LocationValues::default();
        values.set(LocationSlot::LakitelekII, 7.25);
        assert_eq!(values.get(LocationSlot::LakitelekII), 7.25);
        assert_eq!(values.to_array(), [0.0, 0.0, 0.0, 0.0, 0.0, 7.25]);
    }

    #[test]
    fn test_processed_record_resolves_breeder() {
        let record = ProcessedRecord::new("UG1578", LocationValues::default());
        assert_eq!(record.breeder, "Unigen Seeds");
        let unknown = ProcessedRecord::new("???", LocationValues::default());
        assert_eq!(unknown.breeder, super::super::UNKNOWN_BREEDER);
    }
}
