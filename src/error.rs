use std::path::PathBuf;

use thiserror::Error;

/// Every failure the dashboard can report.
///
/// `DataUnavailable` is fatal and aborts startup. `NoDataForFilter` is
/// recovered at the view that raised it and shown as an inline notice.
/// Non-numeric lap speeds never show up here: they are coerced to missing
/// values while loading.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },
    #[error("{0}")]
    NoDataForFilter(String),
    #[error("unknown view: {0}")]
    UnknownView(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("failed to export table: {0}")]
    Export(String),
}

impl DashboardError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DashboardError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn no_data(notice: impl Into<String>) -> Self {
        DashboardError::NoDataForFilter(notice.into())
    }

    /// True for conditions a view should surface inline instead of aborting.
    pub fn is_no_data(&self) -> bool {
        matches!(self, DashboardError::NoDataForFilter(_))
    }
}
