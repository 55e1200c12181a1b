//! Turning raw usage stats into a chart-ready dataset.
//!
//! The stages are pure functions over already fetched data: colors are
//! merged and normalized, items are grouped, then hidden. [`ChartService`]
//! wires them to the stats source, the color registry and the renderer.

pub mod colors;
pub mod group;
pub mod palette;
pub mod pattern;
pub mod pipeline;
pub mod request;

pub use colors::ColorMap;
pub use pattern::{Pattern, PatternSet};
pub use pipeline::{build_dataset, Chart, ChartService, ColorSource, Dataset, Renderer, StatsSource};
pub use request::{Category, ChartKind, ChartRequest, GroupDefs, GroupOverlap, SizeHints};
