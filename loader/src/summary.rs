//! Text-mode dashboard summary, as a viewer with a given access level sees it

use std::collections::BTreeMap;

use serde::Serialize;
use trial_shared::{
    available_locations, compute_stats, cumulative_layout, filter_by_access, flatten,
    location_display_name, AccessLevel, BreederView, MetricSelector, RankDirection,
    TrendPolarity, TrialDatasets,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreederSummary {
    pub breeder: String,
    pub title: String,
    pub varieties: usize,
    /// Top-ranked variety of the chart
    pub leader: Option<String>,
    pub leader_average: f64,
    pub subplot_available: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricSummary {
    pub metric: MetricSelector,
    pub breeders: Vec<BreederSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationSummary {
    pub location: String,
    pub display_name: String,
    /// Breeder → number of varieties
    pub breeders: BTreeMap<String, usize>,
    pub average_ripe: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub access_level: AccessLevel,
    pub metrics: Vec<MetricSummary>,
    /// Empty unless the level may open the cumulative page
    pub cumulative: Vec<LocationSummary>,
}

const METRICS: [MetricSelector; 3] = [
    MetricSelector::MatureBerry,
    MetricSelector::DecayingBerry,
    MetricSelector::Brix,
];

fn summarize_view(view: &BreederView, metric: MetricSelector) -> BreederSummary {
    let leader = view
        .records
        .iter()
        .filter_map(|record| {
            compute_stats(
                &record.variety,
                &view.records,
                RankDirection::for_metric(metric),
                TrendPolarity::for_metric(metric),
            )
        })
        .find(|stats| stats.ranking == 1);

    BreederSummary {
        breeder: view.breeder.clone(),
        title: view.title.clone(),
        varieties: view.records.len(),
        leader_average: leader.as_ref().map(|s| s.average).unwrap_or_default(),
        leader: leader.map(|s| s.variety),
        subplot_available: view.subplot_available,
    }
}

/// Summarize the primary (non-subplot) charts of every metric, plus the
/// cumulative locations when the level allows it
pub fn summarize(datasets: &TrialDatasets, level: AccessLevel) -> DashboardSummary {
    let metrics = METRICS
        .into_iter()
        .map(|metric| {
            let groups = datasets.metric_groups(metric);
            MetricSummary {
                metric,
                breeders: groups
                    .dashboard_views(level, |_| false)
                    .iter()
                    .map(|view| summarize_view(view, metric))
                    .collect(),
            }
        })
        .collect();

    let cumulative = if level.can_view_cumulative() {
        available_locations(&datasets.cumulative)
            .into_iter()
            .map(|location| {
                let groups = filter_by_access(&datasets.cumulative_groups(&location), level);
                let layout = cumulative_layout(&flatten(&groups));
                LocationSummary {
                    display_name: location_display_name(&location).to_string(),
                    breeders: groups.iter().map(|(name, records)| (name.clone(), records.len())).collect(),
                    average_ripe: layout.average_ripe,
                    location,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    DashboardSummary {
        access_level: level,
        metrics,
        cumulative,
    }
}
