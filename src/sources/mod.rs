//! Concrete stats and color sources

mod file;
mod github;
mod wakatime;

pub use file::{FileStatsSource, StaticColors};
pub use github::GithubColors;
pub use wakatime::WakatimeClient;

const FETCH_TIMEOUT_SECS: u64 = 15;
