//! Assembling per-breeder chart views from the loaded datasets

use serde::{Deserialize, Serialize};

use crate::access::filter_by_access;
use crate::cumulative::aggregate;
use crate::grouping::{group, BreederGroups, GroupingContext, SUBPLOT_LOCATION};
use crate::models::{
    breeder_by_name, AccessLevel, Breeder, CumulativeDataset, CumulativeRecord, ProcessedRecord, RawRecord,
    SubplotRecord, BREEDERS, PRESTOMECH_HEINZ, WALLER_HEINZ,
};
use crate::transform::{transform, transform_brix, transform_subplot};
use crate::types::{MetricFamily, MetricSelector};

/// Colour of the Prestomech + Heinz subplot chart
pub const SUBPLOT_HEINZ_COLOR: &str = "#1e40af";

/// The four datasets the dashboard is built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialDatasets {
    pub primary: Vec<RawRecord>,
    pub brix: Vec<RawRecord>,
    pub subplot: Vec<SubplotRecord>,
    pub cumulative: CumulativeDataset,
}

impl TrialDatasets {
    pub fn processed(&self, metric: MetricSelector) -> Vec<ProcessedRecord> {
        match metric {
            MetricSelector::Brix => transform_brix(&self.brix),
            _ => transform(&self.primary, metric),
        }
    }

    pub fn processed_subplot(&self, metric: MetricSelector) -> Vec<ProcessedRecord> {
        transform_subplot(&self.subplot, metric)
    }

    /// Transform and group one metric of the primary and subplot datasets
    pub fn metric_groups(&self, metric: MetricSelector) -> MetricGroups {
        let primary = group(&self.processed(metric), &GroupingContext::new(metric.family()));
        let subplot = group(
            &self.processed_subplot(metric),
            &GroupingContext::at_location(metric.family(), SUBPLOT_LOCATION),
        );

        MetricGroups {
            metric,
            primary,
            subplot,
        }
    }

    /// Cumulative records of one trial location, grouped by breeder.
    /// Unknown locations give an empty mapping.
    pub fn cumulative_groups(&self, location: &str) -> BreederGroups<CumulativeRecord> {
        let rows = self.cumulative.get(location).map(Vec::as_slice).unwrap_or_default();
        group(
            &aggregate(rows),
            &GroupingContext::at_location(MetricFamily::CumulativeYield, location),
        )
    }
}

/// One metric's records grouped by breeder, for both datasets
#[derive(Debug, Clone, PartialEq)]
pub struct MetricGroups {
    pub metric: MetricSelector,
    pub primary: BreederGroups<ProcessedRecord>,
    pub subplot: BreederGroups<ProcessedRecord>,
}

/// A single breeder chart as the dashboard renders it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreederView {
    pub breeder: String,
    pub title: String,
    pub color: String,
    pub records: Vec<ProcessedRecord>,
    pub is_subplot: bool,
    /// Whether the subplot toggle is offered at all
    pub subplot_available: bool,
}

impl BreederView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Breeders whose charts a level may see, in display order
pub fn visible_breeders(level: AccessLevel) -> Vec<&'static Breeder> {
    match level {
        AccessLevel::Total => BREEDERS.iter().collect(),
        AccessLevel::None => Vec::new(),
        _ => BREEDERS
            .iter()
            .filter(|breeder| level.breeder() == Some(breeder.name))
            .collect(),
    }
}

/// Subplot group of a breeder. Heinz records are merged under the
/// Prestomech name at the subplot; access filtering may have moved them back.
fn subplot_records<'a>(breeder: &str, subplot: &'a BreederGroups<ProcessedRecord>) -> &'a [ProcessedRecord] {
    let records = if breeder == WALLER_HEINZ {
        subplot.get(PRESTOMECH_HEINZ).or_else(|| subplot.get(WALLER_HEINZ))
    } else {
        subplot.get(breeder)
    };
    records.map(Vec::as_slice).unwrap_or_default()
}

/// Build the chart view of one breeder. With `show_subplot` the subplot
/// records replace the primary ones; an empty record list is a valid view.
pub fn breeder_view(
    breeder: &Breeder,
    primary: &BreederGroups<ProcessedRecord>,
    subplot: &BreederGroups<ProcessedRecord>,
    show_subplot: bool,
) -> BreederView {
    let subplot_data = subplot_records(breeder.name, subplot);
    let heinz_subplot = show_subplot && breeder.name == WALLER_HEINZ;

    let records = if show_subplot {
        subplot_data.to_vec()
    } else {
        primary.get(breeder.name).cloned().unwrap_or_default()
    };

    BreederView {
        breeder: breeder.name.to_string(),
        title: if heinz_subplot { PRESTOMECH_HEINZ } else { breeder.name }.to_string(),
        color: if heinz_subplot { SUBPLOT_HEINZ_COLOR } else { breeder.color }.to_string(),
        records,
        is_subplot: show_subplot,
        subplot_available: !subplot_data.is_empty(),
    }
}

/// Records a detail panel ranks a selection against: exactly the records
/// of the breeder chart it was made on, primary or subplot per the toggle
pub fn comparison_pool(
    breeder: &Breeder,
    primary: &BreederGroups<ProcessedRecord>,
    subplot: &BreederGroups<ProcessedRecord>,
    is_subplot: bool,
) -> Vec<ProcessedRecord> {
    breeder_view(breeder, primary, subplot, is_subplot).records
}

impl MetricGroups {
    /// Views for every breeder the level may see. `shows_subplot` reports
    /// each breeder's subplot toggle.
    pub fn dashboard_views(
        &self,
        level: AccessLevel,
        shows_subplot: impl Fn(&str) -> bool,
    ) -> Vec<BreederView> {
        let primary = filter_by_access(&self.primary, level);
        let subplot = filter_by_access(&self.subplot, level);

        visible_breeders(level)
            .into_iter()
            .map(|breeder| breeder_view(breeder, &primary, &subplot, shows_subplot(breeder.name)))
            .collect()
    }

    /// Pool of one breeder chart. The subplot title of Waller + Heinz is
    /// accepted as its name; unknown breeders give an empty pool.
    pub fn comparison_pool(&self, breeder: &str, is_subplot: bool) -> Vec<ProcessedRecord> {
        let name = if breeder == PRESTOMECH_HEINZ { WALLER_HEINZ } else { breeder };
        breeder_by_name(name)
            .map(|breeder| comparison_pool(breeder, &self.primary, &self.subplot, is_subplot))
            .unwrap_or_default()
    }
}
