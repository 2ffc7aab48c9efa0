//! Comparative statistics for the variety detail panel
//!
//! Results are display-only and never written back to records.

use serde::{Deserialize, Serialize};

use crate::models::{CumulativeRecord, ProcessedRecord, TrialRecord};
use crate::types::{LocationSlot, MetricSelector, TrialSite};

/// Records the statistics engine can measure
pub trait Measured: TrialRecord {
    /// Every reading of the record (6 locations or 4 ripeness stages)
    fn measurements(&self) -> Vec<f64>;

    /// (first harvest, second harvest) readings per site
    fn harvest_pairs(&self) -> Vec<(f64, f64)>;
}

impl Measured for ProcessedRecord {
    fn measurements(&self) -> Vec<f64> {
        self.locations.to_array().to_vec()
    }

    fn harvest_pairs(&self) -> Vec<(f64, f64)> {
        TrialSite::ALL
            .iter()
            .map(|site| {
                let (first, second) = site.slots();
                (self.locations.get(first), self.locations.get(second))
            })
            .collect()
    }
}

impl Measured for CumulativeRecord {
    fn measurements(&self) -> Vec<f64> {
        self.stages.to_array().to_vec()
    }

    fn harvest_pairs(&self) -> Vec<(f64, f64)> {
        Vec::new()
    }
}

/// Which way the ranking sorts; supplied by the caller, never inferred
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl RankDirection {
    pub fn for_metric(metric: MetricSelector) -> Self {
        if metric.lower_is_better() {
            RankDirection::LowerIsBetter
        } else {
            RankDirection::HigherIsBetter
        }
    }
}

/// Whether a larger retention delta is good (growth) or bad (decay)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendPolarity {
    Growth,
    Decay,
}

impl TrendPolarity {
    /// Decaying berries piling up between harvests is the bad direction
    pub fn for_metric(metric: MetricSelector) -> Self {
        if metric.lower_is_better() {
            TrendPolarity::Decay
        } else {
            TrendPolarity::Growth
        }
    }
}

/// Bucketed retention percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetentionRating {
    /// Above 66 %
    Good,
    /// 33-66 %
    Medium,
    /// Below 33 %
    Weak,
}

impl RetentionRating {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 66.0 {
            RetentionRating::Good
        } else if percent >= 33.0 {
            RetentionRating::Medium
        } else {
            RetentionRating::Weak
        }
    }
}

impl std::fmt::Display for RetentionRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetentionRating::Good => write!(f, "Jó"),
            RetentionRating::Medium => write!(f, "Közepes"),
            RetentionRating::Weak => write!(f, "Gyenge"),
        }
    }
}

/// Statistics of one variety against its sibling set
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VarietyStats {
    pub variety: String,
    /// Mean of the non-zero readings
    pub average: f64,
    pub max: f64,
    /// Smallest non-zero reading, 0 if there is none
    pub min: f64,
    pub active_locations: usize,
    /// 1-based position among siblings
    pub ranking: usize,
    pub sibling_count: usize,
    /// Mean second-minus-first harvest difference
    pub retention_delta: f64,
    pub retention_percent: f64,
    pub retention_rating: RetentionRating,
}

/// Mean of the non-zero values; zeros are absent measurements, not readings
pub fn non_zero_average(values: &[f64]) -> f64 {
    let present: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if present.is_empty() {
        0.0
    } else {
        present.iter().sum::<f64>() / present.len() as f64
    }
}

/// Mean of (second − first) over pairs where both harvests were measured.
/// Pairs missing a reading are left out, not counted as zero.
pub fn retention_delta(pairs: &[(f64, f64)]) -> f64 {
    let differences: Vec<f64> = pairs
        .iter()
        .filter(|(first, second)| *first > 0.0 && *second > 0.0)
        .map(|(first, second)| second - first)
        .collect();
    if differences.is_empty() {
        0.0
    } else {
        differences.iter().sum::<f64>() / differences.len() as f64
    }
}

/// Position a delta between the extremes of all siblings' deltas, in percent.
///
/// Growth: share of the maximum (0 when no sibling grew). Decay: distance
/// below the maximum over the spread, so the smallest delta scores 100.
pub fn retention_percent(delta: f64, all_deltas: &[f64], polarity: TrendPolarity) -> f64 {
    let max = all_deltas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = all_deltas.iter().copied().fold(f64::INFINITY, f64::min);
    if all_deltas.is_empty() {
        return match polarity {
            TrendPolarity::Growth => 0.0,
            TrendPolarity::Decay => 100.0,
        };
    }

    match polarity {
        TrendPolarity::Growth => {
            if max > 0.0 {
                delta / max * 100.0
            } else {
                0.0
            }
        }
        TrendPolarity::Decay => {
            if max != min {
                (max - delta) / (max - min) * 100.0
            } else {
                100.0
            }
        }
    }
}

/// Compute the detail-panel statistics of `selected` among `siblings`.
///
/// `siblings` must include the selected variety; `None` if it does not.
pub fn compute_stats<R: Measured>(
    selected: &str,
    siblings: &[R],
    direction: RankDirection,
    polarity: TrendPolarity,
) -> Option<VarietyStats> {
    let record = siblings.iter().find(|r| r.variety() == selected)?;

    let values = record.measurements();
    let present: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    let average = non_zero_average(&values);
    let max = values.iter().copied().fold(0.0, f64::max);
    let min = present.iter().copied().reduce(f64::min).unwrap_or(0.0);

    let better = siblings
        .iter()
        .map(|sibling| non_zero_average(&sibling.measurements()))
        .filter(|other| match direction {
            RankDirection::HigherIsBetter => *other > average,
            RankDirection::LowerIsBetter => *other < average,
        })
        .count();

    let delta = retention_delta(&record.harvest_pairs());
    let all_deltas: Vec<f64> = siblings
        .iter()
        .map(|sibling| retention_delta(&sibling.harvest_pairs()))
        .collect();
    let percent = retention_percent(delta, &all_deltas, polarity);

    Some(VarietyStats {
        variety: selected.to_string(),
        average,
        max,
        min,
        active_locations: present.len(),
        ranking: better + 1,
        sibling_count: siblings.len(),
        retention_delta: delta,
        retention_percent: percent,
        retention_rating: RetentionRating::from_percent(percent),
    })
}

/// The selected variety's average against one other variety
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SiblingComparison {
    pub variety: String,
    pub average: f64,
    /// Selected average minus this variety's average
    pub difference: f64,
    /// Difference relative to this variety's average, 0 when it has none
    pub percent_difference: f64,
}

/// Compare the selected variety with the first `limit` other varieties
pub fn compare_with_siblings<R: Measured>(selected: &str, siblings: &[R], limit: usize) -> Vec<SiblingComparison> {
    let Some(record) = siblings.iter().find(|r| r.variety() == selected) else {
        return Vec::new();
    };
    let average = non_zero_average(&record.measurements());

    siblings
        .iter()
        .filter(|r| r.variety() != selected)
        .take(limit)
        .map(|other| {
            let other_average = non_zero_average(&other.measurements());
            let difference = average - other_average;
            SiblingComparison {
                variety: other.variety().to_string(),
                average: other_average,
                difference,
                percent_difference: if other_average > 0.0 {
                    difference / other_average * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Minimum bar width (percent) for any non-zero reading
const MIN_BAR_WIDTH: f64 = 15.0;

/// One row of the per-location performance chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationBar {
    pub location: LocationSlot,
    pub label: &'static str,
    pub value: f64,
    pub percent_of_max: f64,
    pub display_width: f64,
    pub active: bool,
}

pub fn location_bars(record: &ProcessedRecord) -> Vec<LocationBar> {
    let max = record.locations.to_array().into_iter().fold(0.0, f64::max);
    record
        .locations
        .iter()
        .map(|(location, value)| {
            let percent_of_max = if max > 0.0 { value / max * 100.0 } else { 0.0 };
            LocationBar {
                location,
                label: location.display_name(),
                value,
                percent_of_max,
                display_width: if value > 0.0 {
                    percent_of_max.max(MIN_BAR_WIDTH)
                } else {
                    percent_of_max
                },
                active: value > 0.0,
            }
        })
        .collect()
}
