//! Cumulative (stacked ripeness-stage) yield view

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grouping::locale_cmp;
use crate::models::{classify, CumulativeDataset, CumulativeRecord, StageQuantities, StageRow};
use crate::types::RipenessStage;

/// Build cumulative records, summing the four stages into `total`.
///
/// Missing stage values count as zero. Recomputed on every call. Rows
/// without a breeder are classified by their base variety name.
pub fn aggregate(rows: &[StageRow]) -> Vec<CumulativeRecord> {
    rows.iter()
        .map(|row| {
            let stages = StageQuantities {
                ripe: row.ripe.unwrap_or(0.0),
                yellow: row.yellow.unwrap_or(0.0),
                green: row.green.unwrap_or(0.0),
                decaying: row.decaying.unwrap_or(0.0),
            };
            let breeder = row
                .breeder
                .clone()
                .unwrap_or_else(|| classify(base_variety_name(&row.variety)).to_string());
            CumulativeRecord::new(row.variety.clone(), breeder, stages)
        })
        .collect()
}

/// Display form of a cumulative dataset location key
pub fn location_display_name(location: &str) -> &str {
    match location {
        "LAKITELEK - 4 SOROS" => "Lakitelek - 4 soros",
        "LAKITELEK - 50 TŐVES" => "Lakitelek - 50 tőves",
        "MEZŐBERÉNY - 2 SOROS" => "Mezőberény - 2 soros",
        "CSABACSŰD - 2 SOROS" => "Csabacsűd - 2 soros",
        other => other,
    }
}

/// Location keys present in the dataset, sorted
pub fn available_locations(dataset: &CumulativeDataset) -> Vec<String> {
    dataset.keys().cloned().collect()
}

/// Variety name without its harvest suffix (`H2239-II` → `H2239`)
pub fn base_variety_name(variety: &str) -> &str {
    let trimmed = variety.trim_end_matches('I');
    match trimmed.strip_suffix('-') {
        Some(base) if trimmed.len() < variety.len() => base,
        _ => variety,
    }
}

/// One stacked series of the cumulative bar chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageSeries {
    pub stage: RipenessStage,
    pub name: &'static str,
    pub color: &'static str,
    /// `None` at spacer rows
    pub data: Vec<Option<f64>>,
}

/// Category axis and stacked series for one breeder at one location
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CumulativeLayout {
    /// Variety per row; spacer rows between variety groups are empty strings
    pub categories: Vec<String>,
    /// Stack order: decaying at the base, ripe on top
    pub series: Vec<StageSeries>,
    /// Reference line: mean ripe quantity across varieties
    pub average_ripe: f64,
    /// Chart height in pixels
    pub height: u32,
}

/// Lay out records as stacked bars, one visual group per base variety
pub fn cumulative_layout(records: &[CumulativeRecord]) -> CumulativeLayout {
    let mut by_base: BTreeMap<&str, Vec<&CumulativeRecord>> = BTreeMap::new();
    for record in records {
        by_base
            .entry(base_variety_name(&record.variety))
            .or_default()
            .push(record);
    }

    let mut rows: Vec<Option<&CumulativeRecord>> = Vec::new();
    let group_count = by_base.len();
    for (index, (_, mut members)) in by_base.into_iter().enumerate() {
        members.sort_by(|a, b| locale_cmp(&a.variety, &b.variety));
        rows.extend(members.into_iter().map(Some));
        if index + 1 < group_count {
            rows.push(None);
        }
    }

    let categories = rows
        .iter()
        .map(|row| row.map(|r| r.variety.clone()).unwrap_or_default())
        .collect::<Vec<_>>();

    let stack_order = [
        RipenessStage::Decaying,
        RipenessStage::Green,
        RipenessStage::Yellow,
        RipenessStage::Ripe,
    ];
    let series = stack_order
        .into_iter()
        .map(|stage| StageSeries {
            stage,
            name: stage.label(),
            color: stage.color(),
            data: rows.iter().map(|row| row.map(|r| r.stages.get(stage))).collect(),
        })
        .collect();

    let average_ripe = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.stages.ripe).sum::<f64>() / records.len() as f64
    };

    CumulativeLayout {
        height: (categories.len() as u32 * 25 + 150).max(400),
        categories,
        series,
        average_ripe,
    }
}
