//! Dataset loading tests
//!
//! Tests for reading trial exports from a data directory:
//! - Required datasets propagate their errors
//! - Supplementary datasets degrade to empty
//! - Both spreadsheet shapes are accepted

use std::path::{Path, PathBuf};

use trial_loader::config::DataConfig;
use trial_loader::datasets::report_findings;
use trial_loader::summary::summarize;
use trial_loader::{DataSource, DatasetLoader, LoadError};
use trial_shared::{AccessLevel, MetricSelector, BASF_NUNHEMS, WALLER_HEINZ};
use uuid::Uuid;

const PRIMARY: &str = r#"{
  "Munka1": [
    {"fajta": "N00541*", "diagramhoz": "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha", "M-I.": 10, "M-II.": 12.5, "Cs-I.": null},
    {"fajta": "N00530", "diagramhoz": "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha", "M-I.": 8, "M-II.": 9},
    {"fajta": "H2239", "diagramhoz": "Tövön tarthatóság - a romló bogyó mennyisége, I. és II. szedés, t/ha", "L-I.": 1.5}
  ]
}"#;

const BRIX: &str = r#"[
  {"fajta": "H1881", "L-I.": 5.2, "L-II.": 5.6},
  {"fajta": "UG8492", "M-I.": 4.9}
]"#;

const SUBPLOT: &str = r#"[
  {"fajta": "H2127", "tipus": "érett", "L-I.": 60, "L-II.": 72.5},
  {"fajta": "N00544", "tipus": "romló", "L-I.": 2}
]"#;

const CUMULATIVE: &str = r#"{
  "LAKITELEK - 4 SOROS": [
    {"variety": "H2239-I", "breeder": "Waller + Heinz", "érett": 40, "sárga": 5, "zöld": 3, "romló": 1},
    {"variety": "N00530-I", "érett": 35.5}
  ]
}"#;

/// Fresh scratch directory holding the given files
fn scratch_dir(files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trial-loader-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
    dir
}

fn loader_for(dir: &Path) -> DatasetLoader {
    let files = DataConfig {
        dir: dir.display().to_string(),
        ..DataConfig::default()
    };
    DatasetLoader::new(DataSource::Directory(dir.to_path_buf()), files)
}

fn all_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("raw_excel_data.json", PRIMARY),
        ("brix_data.json", BRIX),
        ("l50_data.json", SUBPLOT),
        ("halmozott_data.json", CUMULATIVE),
    ]
}

// ============================================================================
// Async Loading Tests
// ============================================================================

#[tokio::test]
async fn test_load_all_reads_every_dataset() {
    let dir = scratch_dir(&all_files());
    let datasets = loader_for(&dir).load_all().await.unwrap();

    assert_eq!(datasets.primary.len(), 3);
    assert_eq!(datasets.brix.len(), 2);
    assert_eq!(datasets.subplot.len(), 2);
    assert_eq!(datasets.cumulative["LAKITELEK - 4 SOROS"].len(), 2);

    let mature = datasets.metric_groups(MetricSelector::MatureBerry);
    assert_eq!(mature.primary[BASF_NUNHEMS].len(), 2);
    assert_eq!(mature.primary[BASF_NUNHEMS][0].variety, "N00530");
}

#[tokio::test]
async fn test_missing_supplementary_datasets_are_empty() {
    let dir = scratch_dir(&[("raw_excel_data.json", PRIMARY), ("brix_data.json", BRIX)]);
    let datasets = loader_for(&dir).load_all().await.unwrap();

    assert!(datasets.subplot.is_empty());
    assert!(datasets.cumulative.is_empty());
    assert_eq!(datasets.primary.len(), 3);
}

#[tokio::test]
async fn test_malformed_cumulative_is_empty() {
    let mut files = all_files();
    files[3] = ("halmozott_data.json", "{not json");
    let dir = scratch_dir(&files);

    let datasets = loader_for(&dir).load_all().await.unwrap();
    assert!(datasets.cumulative.is_empty());
}

#[tokio::test]
async fn test_missing_primary_propagates() {
    let dir = scratch_dir(&[("brix_data.json", BRIX)]);
    let err = loader_for(&dir).load_all().await.unwrap_err();

    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_malformed_brix_propagates() {
    let mut files = all_files();
    files[1] = ("brix_data.json", r#"[{"M-I.": 4.9}]"#);
    let dir = scratch_dir(&files);

    let err = loader_for(&dir).load_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Parse { ref dataset, .. } if dataset == "brix_data.json"));
    assert!(!err.is_unavailable());
}

// ============================================================================
// Blocking Tests
// ============================================================================

#[test]
fn test_primary_accepts_bare_array() {
    let rows = r#"[{"fajta": "UG1578", "M-I.": 3}]"#;
    let dir = scratch_dir(&[("raw_excel_data.json", rows)]);

    let records = tokio_test::block_on(loader_for(&dir).load_primary()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].m_i, Some(3.0));
}

#[test]
fn test_report_findings_counts_bad_rows() {
    let mut files = all_files();
    files[2] = (
        "l50_data.json",
        r#"[{"fajta": "H2127", "tipus": "zöld", "L-I.": 60}, {"fajta": "N00544", "L-I.": -2}]"#,
    );
    let dir = scratch_dir(&files);

    let datasets = tokio_test::block_on(loader_for(&dir).load_all()).unwrap();
    assert_eq!(report_findings(&datasets), 2);
}

#[test]
fn test_summary_for_waller_heinz() {
    let dir = scratch_dir(&all_files());
    let datasets = tokio_test::block_on(loader_for(&dir).load_all()).unwrap();

    let summary = summarize(&datasets, AccessLevel::WallerHeinz);
    assert!(summary.cumulative.is_empty());
    let mature = &summary.metrics[0];
    assert_eq!(mature.breeders.len(), 1);
    assert_eq!(mature.breeders[0].breeder, WALLER_HEINZ);
    assert!(mature.breeders[0].subplot_available);

    let total = summarize(&datasets, AccessLevel::Total);
    assert_eq!(total.cumulative.len(), 1);
    assert_eq!(total.cumulative[0].display_name, "Lakitelek - 4 soros");
    // Harvest suffixes are stripped before classification
    assert_eq!(total.cumulative[0].breeders[WALLER_HEINZ], 1);
    assert_eq!(total.cumulative[0].breeders[BASF_NUNHEMS], 1);
}
