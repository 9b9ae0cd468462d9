use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engagement::Bubble;
use crate::headlines::Fetched;
use crate::headlines::types::write_fetched;
use crate::output::TextView;

pub const TITLE: &str = "📰 AI-Top 5 News Hub";
pub const CAPTION: &str = "Configurable daily top news across your favorite categories.";
pub const PICK_PROMPT: &str = "Pick at least one category to get started.";

const MAX_BAR: u64 = 40;

#[derive(Clone, Debug, Serialize)]
pub struct CategorySection {
    pub label: String,
    pub views: u64,
    #[serde(flatten)]
    pub fetched: Fetched,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Everything a presenter needs to draw one dashboard frame.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    pub notices: Vec<String>,
    pub order: Vec<String>,
    pub primary: Option<String>,
    pub sections: Vec<CategorySection>,
    pub bubbles: Vec<Bubble>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl DashboardView {
    pub fn push_notice(&mut self, notice: String) { self.notices.insert(0, notice); }
}

impl TextView for DashboardView {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", TITLE)?;
        writeln!(w, "{}", CAPTION)?;
        if let Some(ts) = self.last_refresh {
            writeln!(w, "Last refresh: {}", ts.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(w)?;
        for n in &self.notices {
            writeln!(w, "ℹ️  {}", n)?;
        }
        if !self.notices.is_empty() { writeln!(w)?; }

        for s in &self.sections {
            let star = if self.primary.as_deref() == Some(s.label.as_str()) { " ★" } else { "" };
            writeln!(w, "## 📂 {}{}", s.label, star)?;
            write_fetched(w, &s.fetched)?;
            writeln!(w, "---")?;
        }

        write_bubbles(w, &self.bubbles)
    }
}

fn write_bubbles(w: &mut dyn Write, bubbles: &[Bubble]) -> io::Result<()> {
    if bubbles.is_empty() { return Ok(()); }
    writeln!(w, "🫧 Engagement")?;
    let width = bubbles.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    for b in bubbles {
        let mark = match (b.selected, b.primary) {
            (_, true) => '★',
            (true, false) => '●',
            (false, false) => '○',
        };
        let bar = "█".repeat(b.size.min(MAX_BAR) as usize);
        writeln!(w, "{} {:<width$}  {:>3} {}", mark, b.label, b.size, bar, width = width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headlines::Article;

    fn view() -> DashboardView {
        DashboardView {
            notices: vec![],
            order: vec!["Tech / AI".into(), "India".into()],
            primary: Some("Tech / AI".into()),
            sections: vec![
                CategorySection {
                    label: "Tech / AI".into(),
                    views: 2,
                    fetched: Fetched::ok("ai", vec![Article {
                        title: "Model ships".into(),
                        link: "https://example.com/a".into(),
                        published: "Mon, 13 Oct 2025 08:00:00 GMT".into(),
                        source: "Example".into(),
                        summary: String::new(),
                    }]),
                    notice: None,
                },
                CategorySection {
                    label: "India".into(),
                    views: 1,
                    fetched: Fetched::failed("India news", "Error while fetching news for 'India news': request timed out".into()),
                    notice: None,
                },
            ],
            bubbles: vec![Bubble { label: "Tech / AI".into(), count: 2, size: 12, selected: true, primary: true }],
            last_refresh: None,
        }
    }

    #[test]
    fn text_rendering_lists_headlines_warnings_and_bubbles() {
        let mut buf = Vec::new();
        view().write_text(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("## 📂 Tech / AI ★"));
        assert!(s.contains("1. Model ships"));
        assert!(s.contains("Mon, 13 Oct 2025 08:00:00 GMT · Example"));
        assert!(s.contains("⚠️  Error while fetching news for 'India news'"));
        assert!(s.contains("★ Tech / AI   12 ████████████"));
    }

    #[test]
    fn json_shape_flattens_fetched() {
        let v = serde_json::to_value(view()).unwrap();
        assert_eq!(v["sections"][0]["articles"][0]["title"], "Model ships");
        assert_eq!(v["sections"][0]["query"], "ai");
        assert!(v["sections"][0].get("warning").is_none());
        assert!(v["sections"][1]["warning"].as_str().unwrap().contains("timed out"));
    }

    #[test]
    fn notices_are_prepended() {
        let mut v = view();
        v.notices.push(PICK_PROMPT.into());
        v.push_notice("News refreshed!".into());
        assert_eq!(v.notices[0], "News refreshed!");
    }
}
