use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::HubConfig;
use crate::output::{Emitter, TextView};
use crate::telemetry::{self};
use crate::telemetry::ops::categories::Phase as CategoriesPhase;

mod registry;

pub use registry::{Category, CategoryRegistry};

/// hub categories
#[derive(Args)]
pub struct CategoriesCmd {}

#[derive(Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

impl TextView for CategoryList {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        let width = self.categories.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
        for c in &self.categories {
            writeln!(w, "{:<width$}  {}", c.label, c.query, width = width)?;
        }
        Ok(())
    }
}

pub async fn run(cfg: &HubConfig, emitter: &Emitter, _args: CategoriesCmd) -> Result<()> {
    let started = Instant::now();
    let log = telemetry::categories();
    let _g = log.root_span_kv([("with_stocks", cfg.with_stocks.to_string())]).entered();
    let _s = log.span(&CategoriesPhase::List).entered();
    let registry = CategoryRegistry::builtin(cfg.with_stocks);
    log.info_kv("📡 categories", [("count", registry.len().to_string())]);
    emitter.emit("categories", &CategoryList { categories: registry.all().to_vec() }, started)
}
