//! File-backed chart renderer.
//!
//! Drawing pixels is left to whatever consumes the artifact; this renderer
//! lays out a pie chart description (slices, legend labels, resolved colors,
//! figure size) and stores it as `<dir>/<id>.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::palette::map_colors;
use crate::chart::{ChartKind, Dataset, Renderer};
use crate::error::{ChartError, Result};

/// GitHub dark theme
pub const BACKGROUND_COLOR: &str = "#0D1117";
pub const FOREGROUND_COLOR: &str = "#C3D1D9";

/// Slices shown in the legend
const MAX_SLICES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub name: String,
    pub percent: f64,
    pub hours: u64,
    pub minutes: u64,
    pub label: String,
    pub color: String,
}

/// Figure size in inches, 100 px per inch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub id: String,
    pub kind: ChartKind,
    pub background: String,
    pub foreground: String,
    pub size: Option<FigureSize>,
    pub slices: Vec<Slice>,
    pub created_at: DateTime<Utc>,
}

impl ChartArtifact {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let colors = map_colors(&dataset.colors, &dataset.items);

        let slices = dataset
            .items
            .iter()
            .zip(colors)
            .take(MAX_SLICES)
            .map(|(item, color)| Slice {
                name: item.name.clone(),
                percent: item.percent,
                hours: item.hours,
                minutes: item.minutes,
                label: format!("{} - {}h {}m", item.name, item.hours, item.minutes),
                color,
            })
            .collect();

        let size = dataset.size.both().map(|(height, width)| FigureSize {
            width: width as f64 / 100.0,
            height: height as f64 / 100.0,
        });

        Self {
            id: dataset.id.clone(),
            kind: dataset.kind,
            background: BACKGROUND_COLOR.to_string(),
            foreground: FOREGROUND_COLOR.to_string(),
            size,
            slices,
            created_at: Utc::now(),
        }
    }
}

/// Writes artifacts into one directory and finds them by id
pub struct JsonChartRenderer {
    dir: PathBuf,
}

impl JsonChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn artifact_path(&self, id: &str) -> Option<PathBuf> {
        if !is_safe_id(id) {
            return None;
        }
        Some(self.dir.join(format!("{}.json", id)))
    }

    pub fn load(&self, id: &str) -> Result<ChartArtifact> {
        let path = self
            .find_by_id(id)
            .ok_or_else(|| ChartError::MissingArtifact { id: id.to_string() })?;
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Ids become file names; keep them to one plain path component
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Renderer for JsonChartRenderer {
    fn render(&self, dataset: &Dataset) -> Result<()> {
        let path = self
            .artifact_path(&dataset.id)
            .ok_or_else(|| ChartError::Render(format!("invalid chart id: {:?}", dataset.id)))?;

        let artifact = ChartArtifact::from_dataset(dataset);
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;

        tracing::debug!(path = %path.display(), slices = artifact.slices.len(), "artifact written");
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<PathBuf> {
        self.artifact_path(id).filter(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ColorMap, SizeHints};
    use crate::usage::item;

    fn dataset(id: &str, count: usize) -> Dataset {
        let items = (0..count)
            .map(|i| item(&format!("lang{}", i), 100.0 - i as f64, i as u64, 5))
            .collect();
        let colors: ColorMap = [("LANG0".to_string(), "#123456".to_string())].into();
        Dataset {
            id: id.to_string(),
            kind: ChartKind::Pie,
            items,
            colors,
            size: SizeHints {
                height: Some(400),
                width: Some(800),
            },
        }
    }

    #[test]
    fn test_artifact_layout() {
        let artifact = ChartArtifact::from_dataset(&dataset("x", 7));

        assert_eq!(artifact.slices.len(), MAX_SLICES);
        assert_eq!(artifact.slices[0].color, "#123456");
        assert_eq!(artifact.slices[1].color, "#ff7f0e");
        assert_eq!(artifact.slices[2].label, "lang2 - 2h 5m");
        assert_eq!(
            artifact.size,
            Some(FigureSize {
                width: 8.0,
                height: 4.0
            })
        );
    }

    #[test]
    fn test_render_then_find() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = JsonChartRenderer::new(dir.path().join("charts"));

        assert!(renderer.find_by_id("abc-1").is_none());
        renderer.render(&dataset("abc-1", 2)).unwrap();

        let path = renderer.find_by_id("abc-1").unwrap();
        assert!(path.ends_with("abc-1.json"));
        let loaded = renderer.load("abc-1").unwrap();
        assert_eq!(loaded.slices.len(), 2);
    }

    #[test]
    fn test_unsafe_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = JsonChartRenderer::new(dir.path());

        assert!(renderer.render(&dataset("../escape", 1)).is_err());
        assert!(renderer.find_by_id("../escape").is_none());
        assert!(matches!(
            renderer.load(""),
            Err(ChartError::MissingArtifact { .. })
        ));
    }
}
