use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use crate::category::CategoryRegistry;
use crate::config::HubConfig;
use crate::engagement::EngagementState;
use crate::ordering;
use crate::telemetry;

mod command;
mod cycle;
pub mod view;

pub use command::{apply, Outcome, SessionCommand, USAGE};
pub use cycle::render_cycle;

/// Categories chosen for display, duplicate-free and in selection order,
/// plus the optional primary focus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Vec<String>,
    primary: Option<String>,
}

impl SelectionState {
    pub fn new<I, S>(selected: I, primary: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut st = Self { selected: Vec::new(), primary: primary.map(str::to_string) };
        for label in selected { st.select(label.into()); }
        st
    }

    pub fn selected(&self) -> &[String] { &self.selected }

    pub fn primary(&self) -> Option<&str> { self.primary.as_deref() }

    pub fn is_selected(&self, label: &str) -> bool { self.selected.iter().any(|l| l == label) }

    /// Returns false when the label was already selected.
    pub fn select(&mut self, label: String) -> bool {
        if self.is_selected(&label) { return false; }
        self.selected.push(label);
        true
    }

    pub fn deselect(&mut self, label: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|l| l != label);
        self.selected.len() != before
    }

    /// Bubble click: flips membership and reports whether the label is now selected.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.deselect(label) { false } else { self.select(label.to_string()) }
    }

    pub fn set_primary(&mut self, primary: Option<String>) { self.primary = primary; }

    /// Order the render cycle walks: primary first, then the selection.
    pub fn effective_order(&self) -> Vec<String> {
        ordering::order(&self.selected, self.primary())
    }
}

/// Everything one user session owns. Mutated only by the render loop.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: CategoryRegistry,
    pub selection: SelectionState,
    pub engagement: EngagementState,
    pub last_refresh: Option<DateTime<Utc>>,
    initial: SelectionState,
}

impl AppState {
    /// Fresh session from the configured defaults. Unknown default labels are
    /// skipped with a warning.
    pub fn new(cfg: &HubConfig, registry: CategoryRegistry) -> Self {
        let log = telemetry::session();
        let mut selected: Vec<&'static str> = Vec::new();
        for label in &cfg.default_selection {
            match registry.resolve(label) {
                Some(l) => selected.push(l),
                None => log.warn_kv("ignoring unknown default category", [("label", label.clone())]),
            }
        }
        let primary = cfg.default_primary.as_deref().and_then(|p| {
            let resolved = registry.resolve(p);
            if resolved.is_none() { log.warn_kv("ignoring unknown default primary", [("label", p.to_string())]); }
            resolved
        });
        let initial = SelectionState::new(selected, primary);
        Self::with_selection(registry, initial, cfg.engagement_floor)
    }

    pub fn with_selection(registry: CategoryRegistry, selection: SelectionState, floor: u64) -> Self {
        let engagement = EngagementState::new(registry.labels(), floor);
        Self { registry, initial: selection.clone(), selection, engagement, last_refresh: None }
    }

    /// Map user input to a registered label or fail listing the valid ones.
    pub fn resolve_label(&self, input: &str) -> Result<&'static str> {
        match self.registry.resolve(input) {
            Some(l) => Ok(l),
            None => bail!(
                "Unknown category: {} (known: {})",
                input.trim(),
                self.registry.labels().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Full session reset: selection back to its initial value, counters to the floor.
    pub fn reset(&mut self) {
        self.selection = self.initial.clone();
        self.engagement.reset();
        self.last_refresh = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_dedupes_and_keeps_order() {
        let sel = SelectionState::new(["EPL", "India", "EPL"], None);
        assert_eq!(sel.selected(), &["EPL".to_string(), "India".to_string()]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = SelectionState::new(["EPL"], None);
        assert!(sel.toggle("World"));
        assert!(sel.is_selected("World"));
        assert!(!sel.toggle("EPL"));
        assert!(!sel.is_selected("EPL"));
        assert_eq!(sel.selected(), &["World".to_string()]);
    }

    #[test]
    fn empty_selection_with_primary_shows_primary() {
        let sel = SelectionState::new(Vec::<String>::new(), Some("Tech / AI"));
        assert_eq!(sel.effective_order(), vec!["Tech / AI"]);
    }

    #[test]
    fn effective_order_puts_primary_first() {
        let sel = SelectionState::new(["EPL", "India"], Some("Tech / AI"));
        assert_eq!(sel.effective_order(), vec!["Tech / AI", "EPL", "India"]);
    }

    #[test]
    fn new_state_uses_configured_defaults() {
        let cfg = HubConfig::default();
        let st = AppState::new(&cfg, CategoryRegistry::builtin(false));
        assert_eq!(st.selection.selected(), &["Tech / AI".to_string(), "EPL".to_string(), "India".to_string()]);
        assert_eq!(st.selection.primary(), Some("Tech / AI"));
        assert_eq!(st.engagement.count("NFL"), 1);
        assert!(st.last_refresh.is_none());
    }

    #[test]
    fn unknown_defaults_are_dropped() {
        let cfg = HubConfig {
            default_selection: vec!["Cricket".into(), "nfl".into()],
            default_primary: Some("Stocks".into()),
            ..HubConfig::default()
        };
        let st = AppState::new(&cfg, CategoryRegistry::builtin(false));
        assert_eq!(st.selection.selected(), &["NFL".to_string()]);
        assert_eq!(st.selection.primary(), None);
    }

    #[test]
    fn resolve_label_lists_known_labels_on_error() {
        let st = AppState::new(&HubConfig::default(), CategoryRegistry::builtin(false));
        let err = st.resolve_label("Cricket").unwrap_err().to_string();
        assert!(err.contains("Unknown category: Cricket"));
        assert!(err.contains("General Sports"));
    }

    #[test]
    fn reset_restores_initial_session() {
        let mut st = AppState::new(&HubConfig::default(), CategoryRegistry::builtin(false));
        st.selection.toggle("World");
        st.selection.set_primary(None);
        st.engagement.record_view("World");
        st.last_refresh = Some(Utc::now());

        st.reset();
        assert!(!st.selection.is_selected("World"));
        assert_eq!(st.selection.primary(), Some("Tech / AI"));
        assert_eq!(st.engagement.count("World"), 1);
        assert!(st.last_refresh.is_none());
    }

    #[test]
    fn reset_keeps_the_configured_floor() {
        let cfg = HubConfig { engagement_floor: 0, ..HubConfig::default() };
        let mut st = AppState::new(&cfg, CategoryRegistry::builtin(false));
        st.engagement.record_view("EPL");
        st.engagement.record_view("EPL");
        st.reset();
        assert_eq!(st.engagement.count("EPL"), 0);
        assert_eq!(st.engagement.record_view("EPL"), 1);
    }
}
