use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const DEFAULT_PRIMARY: &str = "Tech / AI";
pub const DEFAULT_SELECTION: [&str; 3] = ["Tech / AI", "EPL", "India"];

/// Runtime settings for the hub. Built from defaults, then the environment
/// (`.env` is loaded by `main`), then CLI flags via [`HubConfig::with_overrides`].
#[derive(Clone, Debug, PartialEq)]
pub struct HubConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_items: usize,
    /// Strip and show RSS descriptions. Off by default; most Google News
    /// descriptions just repeat the title as a link.
    pub summaries: bool,
    pub with_stocks: bool,
    /// Baseline every engagement counter starts from (0 or 1).
    pub engagement_floor: u64,
    pub default_primary: Option<String>,
    pub default_selection: Vec<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_items: DEFAULT_MAX_ITEMS,
            summaries: false,
            with_stocks: false,
            engagement_floor: 1,
            default_primary: Some(DEFAULT_PRIMARY.to_string()),
            default_selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// CLI flags that may override environment settings.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_items: Option<usize>,
    pub summaries: bool,
    pub with_stocks: bool,
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(base) = lookup("HUB_FEED_BASE_URL") {
            if !base.trim().is_empty() {
                cfg.base_url = base.trim().to_string();
            }
        }
        if let Some(timeout) = lookup("HUB_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        if let Some(max) = lookup("HUB_MAX_ITEMS") {
            if let Ok(parsed) = max.parse::<usize>() {
                cfg.max_items = parsed;
            }
        }
        if let Some(v) = lookup("HUB_SUMMARIES") {
            cfg.summaries = truthy(&v);
        }
        if let Some(v) = lookup("HUB_WITH_STOCKS") {
            cfg.with_stocks = truthy(&v);
        }
        if let Some(floor) = lookup("HUB_ENGAGEMENT_FLOOR") {
            if let Ok(parsed) = floor.parse::<u64>() {
                cfg.engagement_floor = parsed.min(1);
            }
        }
        if let Some(list) = lookup("HUB_DEFAULT_SELECTION") {
            cfg.default_selection = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(primary) = lookup("HUB_DEFAULT_PRIMARY") {
            cfg.default_primary = crate::ordering::parse_primary(&primary);
        }
        cfg
    }

    pub fn with_overrides(mut self, o: &Overrides) -> Self {
        if let Some(base) = &o.base_url { self.base_url = base.clone(); }
        if let Some(secs) = o.timeout_secs { self.timeout = Duration::from_secs(secs); }
        if let Some(max) = o.max_items { self.max_items = max; }
        if o.summaries { self.summaries = true; }
        if o.with_stocks { self.with_stocks = true; }
        self
    }
}

fn truthy(v: &str) -> bool {
    v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}
