use std::io::{self, Write};

use serde::Serialize;

use crate::output::TextView;

pub const NO_TITLE: &str = "No title";

/// One normalized headline. Built fresh on every fetch and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Timestamp text exactly as the feed provides it.
    pub published: String,
    pub source: String,
    pub summary: String,
}

/// Fields of a feed entry before normalization; any of them may be missing.
#[derive(Clone, Debug, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

/// Outcome of one fetch. A failed fetch carries no articles and a warning;
/// it is never an `Err`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Fetched {
    pub query: String,
    pub articles: Vec<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Fetched {
    pub fn ok(query: &str, articles: Vec<Article>) -> Self {
        Self { query: query.to_string(), articles, warning: None }
    }

    pub fn failed(query: &str, warning: String) -> Self {
        Self { query: query.to_string(), articles: Vec::new(), warning: Some(warning) }
    }

    pub fn is_failed(&self) -> bool { self.warning.is_some() }
}

#[derive(Serialize)]
pub struct FetchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub fetched: Fetched,
}

impl TextView for FetchReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        match &self.label {
            Some(label) => writeln!(w, "## 📂 {}", label)?,
            None => writeln!(w, "## 🔎 {}", self.fetched.query)?,
        }
        write_fetched(w, &self.fetched)
    }
}

pub const NO_NEWS: &str = "No news found for this category right now.";

/// Numbered headline list shared by `fetch` and the dashboard sections.
pub fn write_fetched(w: &mut dyn Write, fetched: &Fetched) -> io::Result<()> {
    if let Some(warning) = &fetched.warning {
        return writeln!(w, "⚠️  {}", warning);
    }
    if fetched.articles.is_empty() {
        writeln!(w, "ℹ️  {}", NO_NEWS)?;
        return Ok(());
    }
    for (idx, a) in fetched.articles.iter().enumerate() {
        writeln!(w, "{}. {}", idx + 1, a.title)?;
        if !a.link.is_empty() { writeln!(w, "   {}", a.link)?; }
        let caption = match (a.published.is_empty(), a.source.is_empty()) {
            (false, false) => format!("{} · {}", a.published, a.source),
            (false, true) => a.published.clone(),
            (true, false) => a.source.clone(),
            (true, true) => String::new(),
        };
        if !caption.is_empty() { writeln!(w, "   {}", caption)?; }
        if !a.summary.is_empty() { writeln!(w, "   {}", a.summary)?; }
    }
    Ok(())
}
