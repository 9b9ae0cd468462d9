//! Per-session view counters and the bubble sizes derived from them.

use std::collections::HashMap;

use serde::Serialize;

use crate::category::CategoryRegistry;
use crate::session::SelectionState;

pub const SELECTED_BONUS: u64 = 5;
pub const PRIMARY_BONUS: u64 = 5;

/// Label -> number of times the category has been rendered this session.
/// Counters only go up; [`EngagementState::reset`] is the full-session reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngagementState {
    floor: u64,
    counts: HashMap<String, u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bubble {
    pub label: String,
    pub count: u64,
    pub size: u64,
    pub selected: bool,
    pub primary: bool,
}

impl EngagementState {
    /// Every known category starts at `floor` (0, or 1 so no bubble is empty).
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>, floor: u64) -> Self {
        let counts = labels.into_iter().map(|l| (l.to_string(), floor)).collect();
        Self { floor, counts }
    }

    pub fn record_view(&mut self, label: &str) -> u64 {
        let c = self.counts.entry(label.to_string()).or_insert(self.floor);
        *c += 1;
        *c
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(self.floor)
    }

    pub fn reset(&mut self) {
        for c in self.counts.values_mut() { *c = self.floor; }
    }

    /// One bubble per registered category, in registry order.
    pub fn bubbles(&self, registry: &CategoryRegistry, selection: &SelectionState) -> Vec<Bubble> {
        registry
            .labels()
            .map(|label| {
                let count = self.count(label);
                let selected = selection.is_selected(label);
                let primary = selection.primary() == Some(label);
                Bubble { label: label.to_string(), count, size: bubble_size(count, selected, primary), selected, primary }
            })
            .collect()
    }
}

pub fn bubble_size(count: u64, selected: bool, primary: bool) -> u64 {
    let mut size = count;
    if selected { size += SELECTED_BONUS; }
    if primary { size += PRIMARY_BONUS; }
    size
}
