//! Errors raised at the chart-callback boundary

use thiserror::Error;

/// Rejections of data-point payloads handed back by the charting layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    #[error("Malformed data point payload: {0}")]
    MalformedPayload(String),

    #[error("Data point has an empty variety")]
    EmptyVariety,

    #[error("Non-finite value in data point for {variety}")]
    NonFiniteValue { variety: String },

    #[error("Breakdown for {variety} has {found} entries, expected {expected}")]
    IncompleteBreakdown {
        variety: String,
        found: usize,
        expected: usize,
    },
}

pub type PanelResult<T> = Result<T, PanelError>;
