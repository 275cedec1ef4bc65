//! Command line arguments.

use std::time::Duration;

use clap::Parser;
use coinboard_lib::BoardConfig;
use coinboard_lib::config::DEFAULT_LOCATION;

#[derive(Parser, Debug)]
#[command(version, about = "Searchable, sortable cryptocurrency market table")]
pub struct Args {
    /// File path or http(s) URL of the record list
    #[arg(default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Load once and filter in memory instead of re-fetching on every search
    #[arg(long)]
    pub cache: bool,

    /// Milliseconds of typing quiescence before a search runs
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Per-request timeout for HTTP sources, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Connect timeout for HTTP sources, in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,
}

impl Args {
    pub fn into_config(self) -> BoardConfig {
        let mut config = BoardConfig::default()
            .with_location(self.location)
            .with_cache_initial_load(self.cache);
        if let Some(ms) = self.debounce_ms {
            config = config.with_debounce(Duration::from_millis(ms));
        }
        if let Some(secs) = self.timeout {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        config
    }
}
