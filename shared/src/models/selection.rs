//! Data points claimed by chart widgets

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CumulativeRecord, ProcessedRecord, StageQuantities};
use crate::error::{PanelError, PanelResult};
use crate::types::{LocationSlot, RipenessStage};

/// Identifier of one rendered chart widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for a newly mounted widget
    pub fn generate() -> Self {
        Self(format!("chart-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One location reading of a variety's breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationReading {
    pub location: LocationSlot,
    pub value: f64,
}

/// A column of a per-location breeder chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationPoint {
    pub variety: String,
    pub location: LocationSlot,
    pub value: f64,
    pub series_color: String,
    pub all_location_data: Vec<LocationReading>,
}

impl LocationPoint {
    pub fn from_record(record: &ProcessedRecord, location: LocationSlot, series_color: &str) -> Self {
        Self {
            variety: record.variety.clone(),
            location,
            value: record.locations.get(location),
            series_color: series_color.to_string(),
            all_location_data: record
                .locations
                .iter()
                .map(|(location, value)| LocationReading { location, value })
                .collect(),
        }
    }
}

/// A segment of a stacked cumulative bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StagePoint {
    pub variety: String,
    pub stage: RipenessStage,
    pub value: f64,
    pub series_color: String,
    pub stages: StageQuantities,
}

impl StagePoint {
    pub fn from_record(record: &CumulativeRecord, stage: RipenessStage, series_color: &str) -> Self {
        Self {
            variety: record.variety.clone(),
            stage,
            value: record.stages.get(stage),
            series_color: series_color.to_string(),
            stages: record.stages,
        }
    }
}

/// Payload of a chart interaction, tagged by chart kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataPoint {
    Location(LocationPoint),
    Stage(StagePoint),
}

impl DataPoint {
    /// Parse and check a payload coming from a chart callback
    pub fn from_event(payload: serde_json::Value) -> PanelResult<Self> {
        let point: DataPoint = serde_json::from_value(payload)
            .map_err(|e| PanelError::MalformedPayload(e.to_string()))?;
        point.validate()?;
        Ok(point)
    }

    pub fn variety(&self) -> &str {
        match self {
            DataPoint::Location(point) => &point.variety,
            DataPoint::Stage(point) => &point.variety,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            DataPoint::Location(point) => point.value,
            DataPoint::Stage(point) => point.value,
        }
    }

    pub fn series_color(&self) -> &str {
        match self {
            DataPoint::Location(point) => &point.series_color,
            DataPoint::Stage(point) => &point.series_color,
        }
    }

    pub fn validate(&self) -> PanelResult<()> {
        if self.variety().trim().is_empty() {
            return Err(PanelError::EmptyVariety);
        }
        let non_finite = || PanelError::NonFiniteValue {
            variety: self.variety().to_string(),
        };
        if !self.value().is_finite() {
            return Err(non_finite());
        }
        match self {
            DataPoint::Location(point) => {
                let expected = LocationSlot::ALL.len();
                if point.all_location_data.len() != expected {
                    return Err(PanelError::IncompleteBreakdown {
                        variety: point.variety.clone(),
                        found: point.all_location_data.len(),
                        expected,
                    });
                }
                if point.all_location_data.iter().any(|r| !r.value.is_finite()) {
                    return Err(non_finite());
                }
            }
            DataPoint::Stage(point) => {
                if point.stages.to_array().iter().any(|v| !v.is_finite()) {
                    return Err(non_finite());
                }
            }
        }
        Ok(())
    }
}

impl From<LocationPoint> for DataPoint {
    fn from(point: LocationPoint) -> Self {
        DataPoint::Location(point)
    }
}

impl From<StagePoint> for DataPoint {
    fn from(point: StagePoint) -> Self {
        DataPoint::Stage(point)
    }
}
