//! Loading the four trial datasets
//!
//! The primary and sugar-content exports are required and their errors
//! propagate. The subplot and cumulative datasets are supplementary: a
//! failed load is logged and replaced by an empty dataset.

use serde::Deserialize;
use trial_shared::{
    validate_brix_record, validate_raw_record, validate_stage_row, validate_subplot_record,
    CumulativeDataset, PrimarySheet, RawRecord, SubplotRecord, TrialDatasets,
};
use uuid::Uuid;

use crate::config::DataConfig;
use crate::error::LoadResult;
use crate::source::DataSource;

/// Spreadsheet exports come either as a bare array or wrapped in their sheet name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetRows {
    Rows(Vec<RawRecord>),
    Sheet(PrimarySheet),
}

/// Reads datasets from a [`DataSource`] using the configured file names
#[derive(Clone)]
pub struct DatasetLoader {
    source: DataSource,
    files: DataConfig,
}

impl DatasetLoader {
    pub fn new(source: DataSource, files: DataConfig) -> Self {
        Self { source, files }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(DataSource::from_config(config), config.clone())
    }

    /// Primary vine-retention export
    pub async fn load_primary(&self) -> LoadResult<Vec<RawRecord>> {
        self.load_sheet(&self.files.primary_file).await
    }

    /// Sugar-content export
    pub async fn load_brix(&self) -> LoadResult<Vec<RawRecord>> {
        self.load_sheet(&self.files.brix_file).await
    }

    async fn load_sheet(&self, name: &str) -> LoadResult<Vec<RawRecord>> {
        let rows = match self.source.read_json::<SheetRows>(name).await? {
            SheetRows::Sheet(sheet) => sheet.rows,
            SheetRows::Rows(rows) => rows,
        };
        tracing::info!("Loaded {} rows from {}", rows.len(), self.source.describe(name));
        Ok(rows)
    }

    /// Subplot export; empty when unavailable
    pub async fn load_subplot(&self) -> Vec<SubplotRecord> {
        let name = &self.files.subplot_file;
        match self.source.read_json::<Vec<SubplotRecord>>(name).await {
            Ok(rows) => {
                tracing::info!("Loaded {} subplot rows from {}", rows.len(), self.source.describe(name));
                rows
            }
            Err(e) => {
                tracing::error!("Error loading subplot data: {}", e);
                Vec::new()
            }
        }
    }

    /// Cumulative dataset; empty when unavailable
    pub async fn load_cumulative(&self) -> CumulativeDataset {
        let name = &self.files.cumulative_file;
        match self.source.read_json::<CumulativeDataset>(name).await {
            Ok(dataset) => {
                tracing::info!(
                    "Loaded cumulative data for {} locations from {}",
                    dataset.len(),
                    self.source.describe(name)
                );
                dataset
            }
            Err(e) => {
                tracing::error!("Error loading cumulative data: {}", e);
                CumulativeDataset::new()
            }
        }
    }

    /// Load all four datasets concurrently
    #[tracing::instrument(skip(self), fields(run_id = %Uuid::new_v4()))]
    pub async fn load_all(&self) -> LoadResult<TrialDatasets> {
        let (primary, brix, subplot, cumulative) = tokio::join!(
            self.load_primary(),
            self.load_brix(),
            self.load_subplot(),
            self.load_cumulative(),
        );

        let datasets = TrialDatasets {
            primary: primary?,
            brix: brix?,
            subplot,
            cumulative,
        };

        let findings = report_findings(&datasets);
        if findings > 0 {
            tracing::warn!("{} rows failed validation", findings);
        }

        Ok(datasets)
    }
}

/// Log every row that fails validation; returns how many did
pub fn report_findings(datasets: &TrialDatasets) -> usize {
    let mut findings = 0;

    let mut report = |dataset: &str, variety: &str, result: Result<(), &'static str>| {
        if let Err(message) = result {
            tracing::warn!(dataset, variety, "{}", message);
            findings += 1;
        }
    };

    for record in &datasets.primary {
        report("primary", &record.variety, validate_raw_record(record));
    }
    for record in &datasets.brix {
        report("brix", &record.variety, validate_brix_record(record));
    }
    for record in &datasets.subplot {
        report("subplot", &record.variety, validate_subplot_record(record));
    }
    for (location, rows) in &datasets.cumulative {
        for row in rows {
            report(location, &row.variety, validate_stage_row(row));
        }
    }

    findings
}
