mod types;

#[cfg(test)]
pub(crate) use types::item;
pub use types::{LanguageColor, StatsData, StatsResponse, UsageItem};
