//! Environment-driven settings
//!
//! - `TWIG_COMMIT_DATE`: fixed commit timestamp (`%Y-%m-%d %H:%M:%S %z`), mostly for tests
//! - `NO_PAGER`: never page `log`/`global-log` output

use chrono::{DateTime, FixedOffset};

pub const COMMIT_DATE_VAR: &str = "TWIG_COMMIT_DATE";
pub const NO_PAGER_VAR: &str = "NO_PAGER";
pub const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    commit_date: Option<DateTime<FixedOffset>>,
    pager: bool,
}

impl Config {
    pub fn new(commit_date: Option<DateTime<FixedOffset>>, pager: bool) -> Self {
        Config { commit_date, pager }
    }

    /// Load settings from the process environment
    ///
    /// A malformed `TWIG_COMMIT_DATE` is rejected rather than silently ignored.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(COMMIT_DATE_VAR) {
            Ok(date_str) => Some(Self::parse_commit_date(&date_str)?),
            Err(_) => None,
        };
        let pager = std::env::var_os(NO_PAGER_VAR).is_none();

        Ok(Config::new(commit_date, pager))
    }

    pub fn parse_commit_date(date_str: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(date_str, COMMIT_DATE_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc2822(date_str))
            .map_err(|err| anyhow::anyhow!("Invalid {COMMIT_DATE_VAR} '{date_str}': {err}"))
    }

    /// Timestamp for a commit created now
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn pager_enabled(&self) -> bool {
        self.pager
    }
}
