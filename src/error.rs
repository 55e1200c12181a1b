use thiserror::Error;

use crate::chart::Category;

/// Failures of one chart run
#[derive(Debug, Error)]
pub enum ChartError {
    /// The stats backend returned nothing for the requested category
    #[error("no {category} data available")]
    MissingData { category: Category },

    /// The renderer did not leave an artifact behind for this id
    #[error("chart {id} was not found after rendering")]
    MissingArtifact { id: String },

    /// A stats or color source could not be read
    #[error("source error: {0}")]
    Source(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
