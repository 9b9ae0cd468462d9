use scraper::Html;

use super::types::{Article, RawEntry, NO_TITLE};

impl Article {
    /// Build an article from a raw feed entry. The description is markup-stripped
    /// into `summary` only when `summaries` is on.
    pub fn from_entry(entry: RawEntry, summaries: bool) -> Self {
        let summary = match entry.description {
            Some(html) if summaries => strip_markup(&html),
            _ => String::new(),
        };
        Article {
            title: entry.title.unwrap_or_default(),
            link: entry.link.unwrap_or_default(),
            published: entry.published.unwrap_or_default(),
            source: entry.source.unwrap_or_default(),
            summary,
        }
        .normalized()
    }

    /// Canonical form: whitespace collapsed in the text fields, link and
    /// date only trimmed, blank title replaced by "No title". Applying it
    /// twice changes nothing.
    pub fn normalized(self) -> Self {
        let title = collapse_whitespace(&self.title);
        Article {
            title: if title.is_empty() { NO_TITLE.to_string() } else { title },
            link: self.link.trim().to_string(),
            published: self.published.trim().to_string(),
            source: collapse_whitespace(&self.source),
            summary: collapse_whitespace(&self.summary),
        }
    }
}

/// Plain text of an HTML fragment: tags dropped, entities decoded,
/// whitespace collapsed.
pub fn strip_markup(html: &str) -> String {
    let frag = Html::parse_fragment(html);
    let text = frag.root_element().text().collect::<String>();
    collapse_whitespace(&text)
}

fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}
