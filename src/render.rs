use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::category::CategoryRegistry;
use crate::config::HubConfig;
use crate::headlines::HeadlineFetcher;
use crate::ordering::parse_primary;
use crate::output::Emitter;
use crate::session::{self, AppState, SelectionState};

/// hub render: one dashboard frame for the given selection
#[derive(Args)]
pub struct RenderCmd {
    /// Category to show; repeat for several. Defaults to the configured selection.
    #[arg(long = "select", short = 's')]
    pub select: Vec<String>,
    /// Primary focus shown first, or "None"
    #[arg(long)]
    pub primary: Option<String>,
    #[arg(long)]
    pub max: Option<usize>,
}

pub async fn run(cfg: &HubConfig, emitter: &Emitter, args: RenderCmd) -> Result<()> {
    let started = Instant::now();
    let registry = CategoryRegistry::builtin(cfg.with_stocks);
    let mut state = AppState::new(cfg, registry);

    if !args.select.is_empty() || args.primary.is_some() {
        let mut selected: Vec<&'static str> = Vec::new();
        for s in &args.select { selected.push(state.resolve_label(s)?); }
        if args.select.is_empty() {
            selected.extend(state.selection.selected().iter().filter_map(|l| state.registry.resolve(l)));
        }
        let primary = match args.primary.as_deref().map(parse_primary) {
            Some(Some(p)) => Some(state.resolve_label(&p)?),
            Some(None) => None,
            None => state.selection.primary().and_then(|p| state.registry.resolve(p)),
        };
        state.selection = SelectionState::new(selected, primary);
    }

    let fetcher = HeadlineFetcher::from_config(cfg)?;
    let view = session::render_cycle(&mut state, &fetcher, args.max.unwrap_or(cfg.max_items)).await;
    emitter.emit("render", &view, started)
}
