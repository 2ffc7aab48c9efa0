//! WebAssembly module for the Tomato Trial Dashboard
//!
//! Provides client-side computation for:
//! - Dataset transformation, breeder grouping and access filtering
//! - Cumulative-yield aggregation and chart layout
//! - Comparative statistics for the detail panel
//! - Detail-panel ownership across chart widgets
//! - Access-level persistence in browser local storage
//!
//! Structured values cross the boundary as JSON strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use trial_shared::models::*;
pub use trial_shared::types::*;

use trial_shared::{
    aggregate, available_locations, breeder_series, classify, color_shades, compare_with_siblings,
    compute_stats, cumulative_layout, filter_by_access, flatten, group, location_bands,
    locale_cmp, location_bars, location_display_name, transform, transform_brix, transform_subplot,
    AccessStore, BreederGroups, ChartWidget, GroupingContext, PanelCoordinator, PanelError, RankDirection,
    TrendPolarity, TrialDatasets, SUBPLOT_LOCATION,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    report("Tomato trial dashboard module loaded");
}

// ============================================================================
// Boundary helpers
// ============================================================================

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn parse_metric(metric: &str) -> Result<MetricSelector, String> {
    serde_json::from_value(serde_json::Value::String(metric.to_string()))
        .map_err(|_| format!("Unknown metric: {}", metric))
}

fn js_error(message: String) -> JsValue {
    JsValue::from(js_sys::Error::new(&message))
}

#[cfg(target_arch = "wasm32")]
fn report(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn report(_message: &str) {}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

// ============================================================================
// Pipeline
// ============================================================================

/// Breeder a variety code belongs to ("Ismeretlen" when unclassified)
#[wasm_bindgen(js_name = classifyVariety)]
pub fn classify_variety(variety: &str) -> String {
    classify(variety).to_string()
}

fn transform_json(rows_json: &str, metric: &str) -> Result<String, String> {
    let rows: Vec<RawRecord> = parse(rows_json, "rows")?;
    let records = match parse_metric(metric)? {
        MetricSelector::Brix => transform_brix(&rows),
        metric => transform(&rows, metric),
    };
    render(&records)
}

/// Transform spreadsheet rows into per-location records for one metric
#[wasm_bindgen(js_name = transformRecords)]
pub fn transform_records(rows_json: &str, metric: &str) -> Result<String, JsValue> {
    transform_json(rows_json, metric).map_err(js_error)
}

fn transform_subplot_json(rows_json: &str, metric: &str) -> Result<String, String> {
    let rows: Vec<SubplotRecord> = parse(rows_json, "subplot rows")?;
    render(&transform_subplot(&rows, parse_metric(metric)?))
}

/// Transform subplot rows (Lakitelek harvests only) for one metric
#[wasm_bindgen(js_name = transformSubplotRecords)]
pub fn transform_subplot_records(rows_json: &str, metric: &str) -> Result<String, JsValue> {
    transform_subplot_json(rows_json, metric).map_err(js_error)
}

/// Breeder names are never empty; blank ones from JS are resolved again
fn resolve_breeder(mut record: ProcessedRecord) -> ProcessedRecord {
    if record.breeder.trim().is_empty() {
        record.breeder = classify(&record.variety).to_string();
    }
    record
}

/// Move records of blank-keyed buckets to the bucket of their classified breeder
fn resolve_blank_keys(mut groups: BreederGroups<ProcessedRecord>) -> BreederGroups<ProcessedRecord> {
    let blank: Vec<String> = groups.keys().filter(|key| key.trim().is_empty()).cloned().collect();
    for key in blank {
        for record in groups.remove(&key).unwrap_or_default() {
            let record = resolve_breeder(ProcessedRecord {
                breeder: String::new(),
                ..record
            });
            groups.entry(record.breeder.clone()).or_default().push(record);
        }
    }
    for (breeder, bucket) in groups.iter_mut() {
        for record in bucket.iter_mut().filter(|r| r.breeder.trim().is_empty()) {
            record.breeder = breeder.clone();
        }
        bucket.sort_by(|a, b| locale_cmp(&a.variety, &b.variety));
    }
    groups
}

fn group_json(records_json: &str, metric: &str, subplot: bool) -> Result<String, String> {
    let records: Vec<ProcessedRecord> = parse::<Vec<ProcessedRecord>>(records_json, "records")?
        .into_iter()
        .map(resolve_breeder)
        .collect();
    let family = parse_metric(metric)?.family();
    let context = if subplot {
        GroupingContext::at_location(family, SUBPLOT_LOCATION)
    } else {
        GroupingContext::new(family)
    };
    render(&group(&records, &context))
}

/// Group processed records by breeder, optionally in the subplot location context
#[wasm_bindgen(js_name = groupByBreeder)]
pub fn group_by_breeder(records_json: &str, metric: &str, subplot: bool) -> Result<String, JsValue> {
    group_json(records_json, metric, subplot).map_err(js_error)
}

fn filter_json(groups_json: &str, level: &str) -> Result<String, String> {
    let groups = resolve_blank_keys(parse(groups_json, "groups")?);
    render(&filter_by_access(&groups, AccessLevel::parse(level)))
}

/// Restrict grouped records to what an access level may see
#[wasm_bindgen(js_name = filterByAccess)]
pub fn filter_groups(groups_json: &str, level: &str) -> Result<String, JsValue> {
    filter_json(groups_json, level).map_err(js_error)
}

// ============================================================================
// Cumulative yield
// ============================================================================

/// Per-variety stage quantities and totals for raw stage rows
#[wasm_bindgen(js_name = aggregateStages)]
pub fn aggregate_stages(rows_json: &str) -> Result<String, JsValue> {
    parse::<Vec<StageRow>>(rows_json, "stage rows")
        .and_then(|rows| render(&aggregate(&rows)))
        .map_err(js_error)
}

fn cumulative_page_json(dataset_json: &str, location: &str, level: &str) -> Result<String, String> {
    let level = AccessLevel::parse(level);
    if !level.can_view_cumulative() {
        return Err(format!("Access level {} cannot view cumulative data", level));
    }
    let dataset: CumulativeDataset = parse(dataset_json, "cumulative dataset")?;
    let rows = dataset.get(location).map(Vec::as_slice).unwrap_or_default();
    let context = GroupingContext::at_location(MetricFamily::CumulativeYield, location);
    let groups = filter_by_access(&group(&aggregate(rows), &context), level);

    let layouts: std::collections::BTreeMap<&String, _> = groups
        .iter()
        .map(|(breeder, records)| (breeder, cumulative_layout(records)))
        .collect();

    render(&serde_json::json!({
        "location": location,
        "displayName": location_display_name(location),
        "layouts": layouts,
        "all": cumulative_layout(&flatten(&groups)),
    }))
}

/// Stacked-bar layouts for one location of the cumulative dataset
#[wasm_bindgen(js_name = cumulativePage)]
pub fn cumulative_page(dataset_json: &str, location: &str, level: &str) -> Result<String, JsValue> {
    cumulative_page_json(dataset_json, location, level).map_err(js_error)
}

fn cumulative_locations_json(dataset_json: &str) -> Result<String, String> {
    let dataset: CumulativeDataset = parse(dataset_json, "cumulative dataset")?;
    let locations: Vec<_> = available_locations(&dataset)
        .into_iter()
        .map(|location| {
            serde_json::json!({
                "displayName": location_display_name(&location),
                "location": location,
            })
        })
        .collect();
    render(&locations)
}

/// Locations of the cumulative dataset, in display order
#[wasm_bindgen(js_name = cumulativeLocations)]
pub fn cumulative_locations(dataset_json: &str) -> Result<String, JsValue> {
    cumulative_locations_json(dataset_json).map_err(js_error)
}

// ============================================================================
// Statistics and series
// ============================================================================

fn stats_json(variety: &str, siblings_json: &str, metric: &str) -> Result<String, String> {
    let siblings: Vec<ProcessedRecord> = parse(siblings_json, "siblings")?;
    let metric = parse_metric(metric)?;
    let stats = compute_stats(
        variety,
        &siblings,
        RankDirection::for_metric(metric),
        TrendPolarity::for_metric(metric),
    );
    render(&stats)
}

/// Detail-panel statistics of a variety against its siblings; `null` when absent
#[wasm_bindgen(js_name = varietyStats)]
pub fn variety_stats(variety: &str, siblings_json: &str, metric: &str) -> Result<String, JsValue> {
    stats_json(variety, siblings_json, metric).map_err(js_error)
}

fn compare_json(variety: &str, siblings_json: &str, limit: usize) -> Result<String, String> {
    let siblings: Vec<ProcessedRecord> = parse(siblings_json, "siblings")?;
    render(&compare_with_siblings(variety, &siblings, limit))
}

/// Side-by-side comparison rows for the detail panel
#[wasm_bindgen(js_name = compareWithSiblings)]
pub fn compare_varieties(variety: &str, siblings_json: &str, limit: usize) -> Result<String, JsValue> {
    compare_json(variety, siblings_json, limit).map_err(js_error)
}

/// Per-location bar widths for a single record
#[wasm_bindgen(js_name = locationBars)]
pub fn location_bars_for(record_json: &str) -> Result<String, JsValue> {
    parse::<ProcessedRecord>(record_json, "record")
        .and_then(|record| render(&location_bars(&record)))
        .map_err(js_error)
}

fn series_json(records_json: &str, color: &str) -> Result<String, String> {
    let records: Vec<ProcessedRecord> = parse(records_json, "records")?;
    render(&breeder_series(&records, color))
}

/// Column series for a breeder chart, one shade of the breeder color per variety
#[wasm_bindgen(js_name = breederSeries)]
pub fn breeder_series_for(records_json: &str, color: &str) -> Result<String, JsValue> {
    series_json(records_json, color).map_err(js_error)
}

/// Shades of a base color for the given number of varieties
#[wasm_bindgen(js_name = colorShades)]
pub fn color_shades_for(base: &str, count: usize) -> Vec<String> {
    let names: Vec<String> = (0..count).map(|i| i.to_string()).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    color_shades(base, &names)
}

/// Site bands behind the location axis
#[wasm_bindgen(js_name = locationBands)]
pub fn location_bands_json() -> Result<String, JsValue> {
    render(&location_bands()).map_err(js_error)
}

// ============================================================================
// Dashboard
// ============================================================================

/// The four loaded datasets, assembled into per-breeder dashboard views
#[wasm_bindgen]
pub struct TrialDashboard {
    datasets: TrialDatasets,
}

impl TrialDashboard {
    fn from_json(datasets_json: &str) -> Result<Self, String> {
        Ok(Self {
            datasets: parse(datasets_json, "datasets")?,
        })
    }

    fn views_json(&self, metric: &str, level: &str, subplot_json: &str) -> Result<String, String> {
        let toggled: BTreeSet<String> = parse(subplot_json, "subplot toggles")?;
        let groups = self.datasets.metric_groups(parse_metric(metric)?);
        render(&groups.dashboard_views(AccessLevel::parse(level), |breeder| toggled.contains(breeder)))
    }

    fn stats_json(&self, metric: &str, breeder: &str, variety: &str, is_subplot: bool) -> Result<String, String> {
        let metric = parse_metric(metric)?;
        let pool = self.datasets.metric_groups(metric).comparison_pool(breeder, is_subplot);
        render(&compute_stats(
            variety,
            &pool,
            RankDirection::for_metric(metric),
            TrendPolarity::for_metric(metric),
        ))
    }
}

#[wasm_bindgen]
impl TrialDashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(datasets_json: &str) -> Result<TrialDashboard, JsValue> {
        Self::from_json(datasets_json).map_err(js_error)
    }

    /// Breeder views visible at `level`; `subplot_json` lists breeders with the subplot toggle on
    pub fn views(&self, metric: &str, level: &str, subplot_json: &str) -> Result<String, JsValue> {
        self.views_json(metric, level, subplot_json).map_err(js_error)
    }

    /// Statistics for a clicked variety against the breeder chart it came from
    pub fn stats(&self, metric: &str, breeder: &str, variety: &str, is_subplot: bool) -> Result<String, JsValue> {
        self.stats_json(metric, breeder, variety, is_subplot).map_err(js_error)
    }

    #[wasm_bindgen(js_name = cumulativeLocations)]
    pub fn cumulative_locations(&self) -> Vec<String> {
        available_locations(&self.datasets.cumulative)
    }
}

// ============================================================================
// Detail panel
// ============================================================================

/// Shared detail panel; widgets created from it compete for ownership
#[wasm_bindgen(js_name = PanelCoordinator)]
#[derive(Default)]
pub struct PanelHandle {
    inner: PanelCoordinator,
}

#[wasm_bindgen(js_class = PanelCoordinator)]
impl PanelHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PanelHandle {
        Self::default()
    }

    #[wasm_bindgen(js_name = createWidget)]
    pub fn create_widget(&self) -> ChartHandle {
        ChartHandle {
            inner: ChartWidget::new(self.inner.clone()),
        }
    }

    pub fn release(&self) {
        self.inner.release();
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Id of the widget currently owning the panel
    pub fn owner(&self) -> Option<String> {
        self.inner.owner().map(|id| id.as_str().to_string())
    }
}

/// One chart's view of the shared panel
#[wasm_bindgen(js_name = ChartWidget)]
pub struct ChartHandle {
    inner: ChartWidget,
}

impl ChartHandle {
    /// Parse a callback payload; rejected payloads are logged and leave state untouched
    fn accept(payload_json: &str) -> Result<DataPoint, PanelError> {
        serde_json::from_str(payload_json)
            .map_err(|e| PanelError::MalformedPayload(e.to_string()))
            .and_then(DataPoint::from_event)
            .inspect_err(|e| warn(&format!("Ignoring chart event: {}", e)))
    }

    fn click(&mut self, payload_json: &str) -> bool {
        match Self::accept(payload_json) {
            Ok(point) => {
                self.inner.on_point_click(point);
                true
            }
            Err(_) => false,
        }
    }

    fn hover(&mut self, payload_json: &str) -> bool {
        match Self::accept(payload_json) {
            Ok(point) => {
                self.inner.on_hover(point);
                true
            }
            Err(_) => false,
        }
    }

    fn legend(&mut self, record_json: &str, color: &str) -> Result<(), String> {
        let record: ProcessedRecord = parse(record_json, "record")?;
        self.inner.toggle_legend(&record, color);
        Ok(())
    }

    fn point_json(&self) -> Result<Option<String>, String> {
        self.inner.panel_point().map(|point| render(&point)).transpose()
    }
}

#[wasm_bindgen(js_class = ChartWidget)]
impl ChartHandle {
    pub fn id(&self) -> String {
        self.inner.id().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Point click; returns false when the payload was rejected
    #[wasm_bindgen(js_name = onPointClick)]
    pub fn on_point_click(&mut self, payload_json: &str) -> bool {
        self.click(payload_json)
    }

    #[wasm_bindgen(js_name = onHover)]
    pub fn on_hover(&mut self, payload_json: &str) -> bool {
        self.hover(payload_json)
    }

    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&mut self) {
        self.inner.on_pointer_leave();
    }

    #[wasm_bindgen(js_name = toggleLegend)]
    pub fn toggle_legend(&mut self, record_json: &str, color: &str) -> Result<(), JsValue> {
        self.legend(record_json, color).map_err(js_error)
    }

    /// Point the panel should show for this widget, as JSON
    #[wasm_bindgen(js_name = panelPoint)]
    pub fn panel_point(&self) -> Result<Option<String>, JsValue> {
        self.point_json().map_err(js_error)
    }

    /// Opacity of a series given the current hover
    pub fn opacity(&self, series: &str) -> f64 {
        self.inner.emphasis(series).opacity()
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}

// ============================================================================
// Access persistence
// ============================================================================

/// Browser local storage holding the access flag
struct LocalStorage(web_sys::Storage);

impl LocalStorage {
    fn open() -> Option<Self> {
        web_sys::window()?.local_storage().ok()?.map(Self)
    }
}

impl AccessStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.0.set_item(key, value).is_err() {
            warn("Failed to persist access level");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.0.remove_item(key).is_err() {
            warn("Failed to clear access level");
        }
    }
}

/// Persisted access level, "none" when absent or storage is unavailable
#[wasm_bindgen(js_name = restoreAccessLevel)]
pub fn restore_access() -> String {
    LocalStorage::open()
        .map(|store| trial_shared::restore_access_level(&store))
        .unwrap_or_default()
        .as_str()
        .to_string()
}

#[wasm_bindgen(js_name = persistAccessLevel)]
pub fn persist_access(level: &str) {
    match LocalStorage::open() {
        Some(mut store) => trial_shared::persist_access_level(&mut store, AccessLevel::parse(level)),
        None => warn("Local storage unavailable"),
    }
}

#[wasm_bindgen(js_name = clearAccessLevel)]
pub fn clear_access() {
    if let Some(mut store) = LocalStorage::open() {
        trial_shared::clear_access_level(&mut store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const ROWS: &str = r#"[
        {"fajta": "N00541*", "diagramhoz": "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha", "M-I.": 10},
        {"fajta": "UG8492", "diagramhoz": "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha", "L-II.": 4}
    ]"#;

    fn location_payload(variety: &str, value: f64) -> String {
        serde_json::json!({
            "kind": "location",
            "variety": variety,
            "location": "M-I",
            "value": value,
            "series_color": "#dc2626",
            "all_location_data": LocationSlot::ALL
                .iter()
                .map(|slot| serde_json::json!({"location": slot, "value": value}))
                .collect::<Vec<_>>(),
        })
        .to_string()
    }

    #[test]
    fn test_classify_variety() {
        assert_eq!(classify_variety("N00541*"), BASF_NUNHEMS);
        assert_eq!(classify_variety("XYZ"), UNKNOWN_BREEDER);
    }

    #[test]
    fn test_transform_and_group() {
        let records = transform_json(ROWS, "mature_berry").unwrap();
        let groups: Value = serde_json::from_str(&group_json(&records, "mature_berry", false).unwrap()).unwrap();

        assert_eq!(groups[BASF_NUNHEMS][0]["variety"], "N00541*");
        assert_eq!(groups[UNIGEN_SEEDS][0]["locations"]["L-II"], 4.0);
    }

    #[test]
    fn test_filter_groups_by_level() {
        let records = transform_json(ROWS, "mature_berry").unwrap();
        let groups = group_json(&records, "mature_berry", false).unwrap();
        let filtered: Value = serde_json::from_str(&filter_json(&groups, "unigen").unwrap()).unwrap();

        assert!(filtered.get(UNIGEN_SEEDS).is_some());
        assert!(filtered.get(BASF_NUNHEMS).is_none());
    }

    #[test]
    fn test_unknown_metric_rejected() {
        assert!(transform_json(ROWS, "colour").unwrap_err().contains("Unknown metric"));
        assert!(transform_json("{", "brix").unwrap_err().starts_with("Invalid rows JSON"));
    }

    #[test]
    fn test_cumulative_page_requires_total() {
        let dataset = r#"{"LAKITELEK - 4 SOROS": [{"variety": "UG1578-I", "érett": 3, "sárga": 1, "romló": 2}]}"#;
        assert!(cumulative_page_json(dataset, "LAKITELEK - 4 SOROS", "unigen").is_err());

        let page: Value =
            serde_json::from_str(&cumulative_page_json(dataset, "LAKITELEK - 4 SOROS", "total").unwrap()).unwrap();
        assert_eq!(page["displayName"], "Lakitelek - 4 soros");
        assert_eq!(page["all"]["categories"][0], "UG1578-I");
    }

    #[test]
    fn test_stats_json_ranks_against_siblings() {
        let records = transform_json(ROWS, "mature_berry").unwrap();
        let stats: Value = serde_json::from_str(&stats_json("N00541*", &records, "mature_berry").unwrap()).unwrap();
        assert_eq!(stats["ranking"], 1);
        assert_eq!(stats_json("H9999", &records, "mature_berry").unwrap(), "null");
    }

    #[test]
    fn test_color_shades_count() {
        assert_eq!(color_shades_for("#dc2626", 3).len(), 3);
        assert!(color_shades_for("#dc2626", 0).is_empty());
    }

    #[test]
    fn test_widgets_share_one_panel() {
        let panel = PanelHandle::new();
        let mut first = panel.create_widget();
        let mut second = panel.create_widget();

        assert!(first.click(&location_payload("N00541*", 10.0)));
        assert!(first.is_active());

        assert!(second.click(&location_payload("UG8492", 4.0)));
        assert!(!first.is_active());
        assert_eq!(panel.owner(), Some(second.id()));

        let point: Value = serde_json::from_str(&second.point_json().unwrap().unwrap()).unwrap();
        assert_eq!(point["variety"], "UG8492");
        assert!(first.point_json().unwrap().is_none());

        second.close();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_rejected_payload_leaves_panel_closed() {
        let panel = PanelHandle::new();
        let mut widget = panel.create_widget();

        assert!(!widget.click("{not json"));
        assert!(!widget.click(&location_payload("", 1.0)));
        assert!(!widget.click(&location_payload("N00541*", 1.0).replace("\"M-I\"", "\"X\"")));
        assert!(!panel.is_open());
    }

    #[test]
    fn test_hover_dims_other_series() {
        let panel = PanelHandle::new();
        let mut widget = panel.create_widget();

        assert!(widget.hover(&location_payload("N00541*", 10.0)));
        assert_eq!(widget.opacity("N00541*"), 1.0);
        assert_eq!(widget.opacity("UG8492"), trial_shared::DIMMED_OPACITY);

        widget.on_pointer_leave();
        assert_eq!(widget.opacity("UG8492"), 1.0);
    }

    #[test]
    fn test_dashboard_views_follow_level() {
        let datasets = serde_json::json!({
            "primary": serde_json::from_str::<Value>(ROWS).unwrap(),
            "brix": [],
            "subplot": [],
            "cumulative": {},
        })
        .to_string();
        let dashboard = TrialDashboard::from_json(&datasets).unwrap();

        let views: Value = serde_json::from_str(&dashboard.views_json("mature_berry", "nunhems", "[]").unwrap()).unwrap();
        assert_eq!(views.as_array().unwrap().len(), 1);
        assert_eq!(views[0]["breeder"], BASF_NUNHEMS);

        let none: Value = serde_json::from_str(&dashboard.views_json("mature_berry", "none", "[]").unwrap()).unwrap();
        assert!(none.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_stats_rank_within_breeder_chart() {
        let label = "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha";
        let datasets = serde_json::json!({
            "primary": [
                {"fajta": "N00530", "diagramhoz": label, "M-I.": 40},
                {"fajta": "N00544", "diagramhoz": label, "M-I.": 10},
                {"fajta": "UG8492", "diagramhoz": label, "M-I.": 50},
                {"fajta": "H2239", "diagramhoz": label, "M-I.": 60},
            ],
            "brix": [],
            "subplot": [{"fajta": "N00544", "tipus": "érett", "L-I.": 90, "L-II.": 95}],
            "cumulative": {},
        })
        .to_string();
        let dashboard = TrialDashboard::from_json(&datasets).unwrap();

        let primary: Value =
            serde_json::from_str(&dashboard.stats_json("mature_berry", BASF_NUNHEMS, "N00544", false).unwrap()).unwrap();
        assert_eq!(primary["ranking"], 2);
        assert_eq!(primary["sibling_count"], 2);

        let subplot: Value =
            serde_json::from_str(&dashboard.stats_json("mature_berry", BASF_NUNHEMS, "N00544", true).unwrap()).unwrap();
        assert_eq!(subplot["average"], 92.5);
        assert_eq!(subplot["ranking"], 1);
        assert_eq!(subplot["sibling_count"], 1);

        assert_eq!(dashboard.stats_json("mature_berry", UNIGEN_SEEDS, "N00544", false).unwrap(), "null");
    }

    #[test]
    fn test_blank_breeder_is_resolved_at_the_boundary() {
        let records = r#"[{"variety": "N00530", "breeder": "", "locations": {"M-I": 3}}]"#;
        let groups: Value = serde_json::from_str(&group_json(records, "mature_berry", false).unwrap()).unwrap();
        assert!(groups.get("").is_none());
        assert_eq!(groups[BASF_NUNHEMS][0]["breeder"], BASF_NUNHEMS);

        let blank_key = r#"{"": [{"variety": "UG8492", "breeder": " ", "locations": {}}]}"#;
        let filtered: Value = serde_json::from_str(&filter_json(blank_key, "total").unwrap()).unwrap();
        assert!(filtered.get("").is_none());
        assert_eq!(filtered[UNIGEN_SEEDS][0]["breeder"], UNIGEN_SEEDS);
    }
}
