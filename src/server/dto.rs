use serde::{Deserialize, Serialize};

use crate::chart::Chart;

/// Generic API response wrapper
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Created chart reference
#[derive(Serialize, Deserialize)]
pub struct ChartDto {
    pub id: String,
    pub path: String,
    /// Where the artifact can be fetched from this server
    pub url: String,
}

impl From<Chart> for ChartDto {
    fn from(chart: Chart) -> Self {
        Self {
            url: format!("/api/charts/{}", chart.id),
            path: chart.path.to_string_lossy().to_string(),
            id: chart.id,
        }
    }
}
