use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;

use crate::category::CategoryRegistry;
use crate::config::HubConfig;
use crate::output::Emitter;
use crate::telemetry::{self};
use crate::telemetry::ops::fetch::Phase as FetchPhase;

pub mod fetch;
mod normalize;
mod parse;
pub mod types;

pub use fetch::{FeedSource, FetchError, HttpFeedSource};
pub use types::{Article, Fetched};

/// hub fetch <LABEL> | --query <Q>
#[derive(Args)]
pub struct FetchCmd {
    /// Category label, e.g. "India" or "Tech / AI"
    pub label: Option<String>,
    /// Raw search string instead of a category
    #[arg(long, conflicts_with = "label")]
    pub query: Option<String>,
    #[arg(long)]
    pub max: Option<usize>,
}

/// Turns a search string into at most `max_items` normalized articles.
/// Failures never escape: they come back as a warning on [`Fetched`].
pub struct HeadlineFetcher<S: FeedSource> {
    source: S,
    base_url: String,
    summaries: bool,
}

impl HeadlineFetcher<HttpFeedSource> {
    pub fn from_config(cfg: &HubConfig) -> Result<Self> {
        let source = HttpFeedSource::new(cfg.timeout)?;
        Ok(Self::new(source, cfg))
    }
}

impl<S: FeedSource> HeadlineFetcher<S> {
    pub fn new(source: S, cfg: &HubConfig) -> Self {
        Self { source, base_url: cfg.base_url.clone(), summaries: cfg.summaries }
    }

    pub async fn fetch(&self, query: &str, max_items: usize) -> Fetched {
        let log = telemetry::fetch();
        let _g = log.root_span_kv([("query", query.to_string()), ("max", max_items.to_string())]).entered();

        match self.try_fetch(query, max_items).await {
            Ok(articles) => {
                log.debug(format!("fetched {} articles for '{}'", articles.len(), query));
                Fetched::ok(query, articles)
            }
            Err(err) => {
                log.warn_kv("fetch failed", [("query", query.to_string()), ("error", err.to_string())]);
                Fetched::failed(query, format!("Error while fetching news for '{}': {}", query, err))
            }
        }
    }

    async fn try_fetch(&self, query: &str, max_items: usize) -> Result<Vec<Article>, FetchError> {
        let log = telemetry::fetch();
        if max_items == 0 {
            return Ok(Vec::new());
        }
        let url = fetch::search_url(&self.base_url, query)?;
        let body = {
            let _s = log.span_kv(&FetchPhase::Request, [("url", url.clone())]).entered();
            self.source.fetch_feed(&url).await?
        };
        let entries = { let _s = log.span(&FetchPhase::Parse).entered(); parse::parse_entries(&body, max_items)? };
        let _s = log.span(&FetchPhase::Normalize).entered();
        Ok(entries
            .into_iter()
            .map(|entry| Article::from_entry(entry, self.summaries))
            .collect())
    }
}

#[cfg(test)]
impl HeadlineFetcher<fetch::MockFeedSource> {
    pub(crate) fn source_calls(&self) -> Vec<String> { self.source.calls() }
}

pub async fn run(cfg: &HubConfig, emitter: &Emitter, args: FetchCmd) -> Result<()> {
    let started = Instant::now();
    let registry = CategoryRegistry::builtin(cfg.with_stocks);
    let (label, query) = match (args.label, args.query) {
        (_, Some(q)) => (None, q),
        (Some(l), None) => match registry.resolve(&l) {
            Some(label) => (Some(label.to_string()), registry.query(label).unwrap_or_default().to_string()),
            None => bail!("Unknown category: {} (known: {})", l, registry.labels().collect::<Vec<_>>().join(", ")),
        },
        (None, None) => bail!("Provide a category label or --query"),
    };
    let max = args.max.unwrap_or(cfg.max_items);

    let fetcher = HeadlineFetcher::from_config(cfg)?;
    let fetched = fetcher.fetch(&query, max).await;
    emitter.emit("fetch", &types::FetchReport { label, fetched }, started)
}
