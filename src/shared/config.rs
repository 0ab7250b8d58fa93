//! Application configuration. Collaborator URLs, grid and timeout knobs.

use serde::Deserialize;

/// Default slot grid granularity in minutes.
pub const DEFAULT_SLOT_STEP_MIN: u32 = 30;

/// Default per-collaborator submission deadline in seconds.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Persistence form endpoint URL. Read from BOOKFLOW_FORM_URL. Unset
    /// means the in-memory store is used.
    #[serde(default)]
    pub form_url: Option<String>,

    /// Operator webhook URL. Read from BOOKFLOW_NOTIFY_URL. Unset means the
    /// mock notifier is used.
    #[serde(default)]
    pub notify_url: Option<String>,

    /// Slot grid granularity in minutes (default 30). Read from
    /// BOOKFLOW_SLOT_STEP_MIN.
    #[serde(default)]
    pub slot_step_min: Option<u32>,

    /// Per-collaborator submission deadline in seconds (default 30). Read
    /// from BOOKFLOW_SUBMIT_TIMEOUT_SECS.
    #[serde(default)]
    pub submit_timeout_secs: Option<u64>,

    /// Comma-separated "YYYY-MM-DD HH:MM" slots pre-marked as taken in the
    /// demo index. Read from BOOKFLOW_SEED_BOOKED.
    #[serde(default)]
    pub seed_booked: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("BOOKFLOW"));
        if let Ok(path) = std::env::var("BOOKFLOW_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the slot grid step in minutes. Defaults to 30 if unset.
    pub fn slot_step_min_or_default(&self) -> u32 {
        self.slot_step_min.unwrap_or(DEFAULT_SLOT_STEP_MIN)
    }

    /// Returns the submission deadline in seconds. Defaults to 30 if unset.
    pub fn submit_timeout_secs_or_default(&self) -> u64 {
        self.submit_timeout_secs
            .unwrap_or(DEFAULT_SUBMIT_TIMEOUT_SECS)
    }
}
