//! WakaTime usage stats to chart-ready datasets.
//!
//! Raw stats are grouped, filtered and given colors from the request, group
//! overrides and the GitHub language registry before being handed to a
//! [`chart::Renderer`].

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod server;
pub mod sources;
pub mod usage;

pub use error::{ChartError, Result};
