//! Reshaping flat spreadsheet rows into per-location records
//!
//! Every transformer keeps input order and zero-fills missing readings, so
//! downstream arithmetic never sees an absent value.

use crate::models::{LocationValues, ProcessedRecord, RawRecord, SubplotRecord};
use crate::types::{LocationSlot, MetricSelector};

/// Filter the primary dataset to one metric and reshape each matching row.
///
/// Sugar-content rows carry no diagram label in the primary sheet, so
/// [`MetricSelector::Brix`] matches nothing here; use [`transform_brix`] on
/// the sugar-content dataset instead.
pub fn transform(records: &[RawRecord], metric: MetricSelector) -> Vec<ProcessedRecord> {
    let Some(label) = metric.category_label() else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|record| record.category.as_deref() == Some(label))
        .map(to_processed)
        .collect()
}

/// Reshape the sugar-content dataset; it holds a single metric, so every row is kept
pub fn transform_brix(records: &[RawRecord]) -> Vec<ProcessedRecord> {
    records.iter().map(to_processed).collect()
}

/// Reshape the 50-plant Lakitelek subplot rows.
///
/// Only `L-I` and `L-II` are populated; the other four slots stay zero so
/// the result can be concatenated with primary records.
pub fn transform_subplot(records: &[SubplotRecord], metric: MetricSelector) -> Vec<ProcessedRecord> {
    let tag = metric.subplot_tag();

    records
        .iter()
        .filter(|record| record.kind.as_deref() == tag)
        .map(|record| {
            let mut locations = LocationValues::default();
            locations.set(LocationSlot::LakitelekI, record.l_i.unwrap_or(0.0));
            locations.set(LocationSlot::LakitelekII, record.l_ii.unwrap_or(0.0));
            ProcessedRecord::new(record.variety.clone(), locations)
        })
        .collect()
}

fn to_processed(record: &RawRecord) -> ProcessedRecord {
    let mut locations = LocationValues::default();
    for slot in LocationSlot::ALL {
        locations.set(slot, record.yield_at(slot).unwrap_or(0.0));
    }
    ProcessedRecord::new(record.variety.clone(), locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BASF_NUNHEMS;

    fn raw(variety: &str, metric: MetricSelector, m_i: Option<f64>) -> RawRecord {
        RawRecord {
            variety: variety.to_string(),
            category: metric.category_label().map(str::to_string),
            m_i,
            m_ii: Some(2.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_transform_mature_record() {
        let records = vec![raw("N00541*", MetricSelector::MatureBerry, Some(10.0))];
        let processed = transform(&records, MetricSelector::MatureBerry);
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].breeder, BASF_NUNHEMS);
        assert_eq!(processed[0].locations.get(LocationSlot::MezoberenyI), 10.0);
    }

    #[test]
    fn test_transform_filters_by_category() {
        let records = vec![
            raw("N00530", MetricSelector::MatureBerry, Some(1.0)),
            raw("N00530", MetricSelector::DecayingBerry, Some(0.5)),
            raw("H2239", MetricSelector::DecayingBerry, None),
        ];
        let decaying = transform(&records, MetricSelector::DecayingBerry);
        assert_eq!(decaying.len(), 2);
        assert_eq!(decaying[0].locations.get(LocationSlot::MezoberenyI), 0.5);
        // Missing column zero-filled
        assert_eq!(decaying[1].locations.get(LocationSlot::MezoberenyI), 0.0);
        assert_eq!(decaying[1].locations.get(LocationSlot::LakitelekII), 0.0);
    }

    #[test]
    fn test_transform_preserves_order() {
        let records = vec![
            raw("UG8492", MetricSelector::MatureBerry, Some(1.0)),
            raw("H2127", MetricSelector::MatureBerry, Some(2.0)),
            raw("N4510", MetricSelector::MatureBerry, Some(3.0)),
        ];
        let varieties: Vec<String> = transform(&records, MetricSelector::MatureBerry)
            .into_iter()
            .map(|r| r.variety)
            .collect();
        assert_eq!(varieties, vec!["UG8492", "H2127", "N4510"]);
    }

    #[test]
    fn test_transform_brix_keeps_every_row() {
        let records = vec![
            RawRecord {
                variety: "H1881".to_string(),
                l_i: Some(5.2),
                ..Default::default()
            },
            RawRecord {
                variety: "N00339".to_string(),
                ..Default::default()
            },
        ];
        let processed = transform_brix(&records);
        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0].locations.get(LocationSlot::LakitelekI), 5.2);
        assert_eq!(transform(&records, MetricSelector::Brix).len(), 0);
    }

    #[test]
    fn test_transform_subplot_populates_lakitelek_only() {
        let rows = vec![
            SubplotRecord {
                variety: "N00544".to_string(),
                kind: Some("érett".to_string()),
                l_i: Some(60.0),
                l_ii: Some(72.5),
            },
            SubplotRecord {
                variety: "N00544".to_string(),
                kind: Some("romló".to_string()),
                l_i: Some(1.0),
                l_ii: None,
            },
        ];
        let mature = transform_subplot(&rows, MetricSelector::MatureBerry);
        assert_eq!(mature.len(), 1);
        assert_eq!(mature[0].locations.to_array(), [0.0, 0.0, 0.0, 0.0, 60.0, 72.5]);

        let decaying = transform_subplot(&rows, MetricSelector::DecayingBerry);
        assert_eq!(decaying[0].locations.get(LocationSlot::LakitelekII), 0.0);

        assert!(transform_subplot(&rows, MetricSelector::Brix).is_empty());
    }
}
