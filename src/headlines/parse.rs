use rss::{Channel, Item};

use super::fetch::FetchError;
use super::types::RawEntry;
use crate::telemetry;

/// Item fields worth keeping when an item has to be rebuilt piece by piece.
const ITEM_FIELDS: [&str; 6] = ["title", "link", "pubDate", "dc:date", "source", "description"];

const DEFAULT_ROOT: &str = r#"<rss version="2.0">"#;

pub fn parse_channel(xml: &[u8]) -> Result<Channel, FetchError> {
    Channel::read_from(xml).map_err(FetchError::Parse)
}

/// First `max_items` entries of the feed. A malformed document is recovered
/// item by item; inside a broken item each field is tried on its own and the
/// ones that fail are left missing. Errors only when nothing is recoverable.
pub fn parse_entries(xml: &[u8], max_items: usize) -> Result<Vec<RawEntry>, FetchError> {
    let err = match parse_channel(xml) {
        Ok(channel) => return Ok(take_entries(&channel, max_items)),
        Err(err) => err,
    };

    let text = String::from_utf8_lossy(xml);
    let root = root_tag(&text);
    let segments = elements(&text, "item");
    if segments.is_empty() {
        return Err(err);
    }

    let entries: Vec<RawEntry> = segments
        .iter()
        .filter_map(|seg| recover_item(root, seg))
        .take(max_items)
        .collect();
    if entries.is_empty() && max_items > 0 {
        return Err(err);
    }

    telemetry::fetch().warn_kv("feed recovered item by item", [
        ("items", segments.len().to_string()),
        ("kept", entries.len().to_string()),
        ("error", err.to_string()),
    ]);
    Ok(entries)
}

/// First `max_items` entries in feed order.
pub fn take_entries(channel: &Channel, max_items: usize) -> Vec<RawEntry> {
    channel.items().iter().take(max_items).map(raw_entry).collect()
}

pub fn raw_entry(item: &Item) -> RawEntry {
    RawEntry {
        title: item.title().map(str::to_string),
        link: item.link().map(str::to_string),
        published: extract_published(item),
        source: item.source().and_then(|s| s.title()).map(str::to_string),
        description: item.description().map(str::to_string),
    }
}

// pubDate text as-is; Dublin Core date when pubDate is absent
fn extract_published(item: &Item) -> Option<String> {
    if let Some(pub_date) = item.pub_date() {
        return Some(pub_date.to_string());
    }
    item.dublin_core_ext()
        .and_then(|dc| dc.dates().first())
        .map(|d| d.to_string())
}

// whole item first, then only the fields that parse alone; None when no field survives
fn recover_item(root: &str, item: &str) -> Option<RawEntry> {
    if let Some(entry) = parse_single_item(root, item) {
        return Some(entry);
    }
    let good: String = ITEM_FIELDS
        .iter()
        .flat_map(|name| elements(item, name))
        .filter(|el| parse_single_item(root, &format!("<item>{el}</item>")).is_some())
        .collect();
    if good.is_empty() {
        return None;
    }
    parse_single_item(root, &format!("<item>{good}</item>"))
}

fn parse_single_item(root: &str, item: &str) -> Option<RawEntry> {
    let doc = format!("{root}<channel>{item}</channel></rss>");
    let channel = Channel::read_from(doc.as_bytes()).ok()?;
    channel.items().first().map(raw_entry)
}

// opening <rss ...> tag, so namespace declarations carry over
fn root_tag(text: &str) -> &str {
    let Some(start) = find_open(text, "rss", 0) else { return DEFAULT_ROOT };
    match text[start..].find('>') {
        Some(end) => &text[start..start + end + 1],
        None => DEFAULT_ROOT,
    }
}

/// Every complete `<name ...>...</name>` element in document order.
fn elements<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
    let close = format!("</{name}>");
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = find_open(text, name, pos) {
        match text[start..].find(&close) {
            Some(rel) => {
                let end = start + rel + close.len();
                out.push(&text[start..end]);
                pos = end;
            }
            None => break,
        }
    }
    out
}

// start of `<name` followed by '>', '/' or whitespace (so `<item` never matches `<items`)
fn find_open(text: &str, name: &str, from: usize) -> Option<usize> {
    let open = format!("<{name}");
    let mut pos = from;
    while let Some(rel) = text[pos..].find(&open) {
        let start = pos + rel;
        let next = text[start + open.len()..].chars().next();
        if matches!(next, Some(c) if c == '>' || c == '/' || c.is_whitespace()) {
            return Some(start);
        }
        pos = start + open.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>"India news" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Monsoon arrives early</title>
      <link>https://example.com/monsoon</link>
      <pubDate>Mon, 13 Oct 2025 08:00:00 GMT</pubDate>
      <description>&lt;a href="https://example.com/monsoon"&gt;Monsoon arrives early&lt;/a&gt;</description>
      <source url="https://example.com">Example Times</source>
    </item>
    <item>
      <link>https://example.com/untitled</link>
      <dc:date>2025-10-13T09:30:00Z</dc:date>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_entries_in_order() {
        let ch = parse_channel(FEED.as_bytes()).unwrap();
        let entries = take_entries(&ch, 5);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Monsoon arrives early"));
        assert_eq!(entries[0].source.as_deref(), Some("Example Times"));
        assert_eq!(entries[0].published.as_deref(), Some("Mon, 13 Oct 2025 08:00:00 GMT"));
        assert!(entries[0].description.as_deref().unwrap().starts_with("<a href="));
        assert_eq!(entries[1].title, None);
    }

    #[test]
    fn published_falls_back_to_dublin_core() {
        let ch = parse_channel(FEED.as_bytes()).unwrap();
        let entries = take_entries(&ch, 5);
        assert_eq!(entries[1].published.as_deref(), Some("2025-10-13T09:30:00Z"));
        assert_eq!(entries[1].source, None);
    }

    #[test]
    fn take_is_bounded() {
        let ch = parse_channel(FEED.as_bytes()).unwrap();
        assert_eq!(take_entries(&ch, 1).len(), 1);
        assert!(take_entries(&ch, 0).is_empty());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_channel(b"<html><body>oops</body></html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    const BROKEN_MIDDLE: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>https://news.google.com</link><description>d</description>
<item><title>Markets open higher</title><link>https://example.com/1</link><pubDate>Mon, 13 Oct 2025 08:00:00 GMT</pubDate></item>
<item><title>AT&T earnings & more</title><link>https://example.com/2</link><source url="https://example.com">Wire</source></item>
<item><title>Bonds slip</title><link>https://example.com/3</link></item>
</channel></rss>"#;

    #[test]
    fn bad_item_keeps_its_neighbours_and_good_fields() {
        assert!(parse_channel(BROKEN_MIDDLE.as_bytes()).is_err());
        let entries = parse_entries(BROKEN_MIDDLE.as_bytes(), 5).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title.as_deref(), Some("Markets open higher"));
        assert_eq!(entries[0].published.as_deref(), Some("Mon, 13 Oct 2025 08:00:00 GMT"));
        assert_eq!(entries[1].title, None);
        assert_eq!(entries[1].link.as_deref(), Some("https://example.com/2"));
        assert_eq!(entries[1].source.as_deref(), Some("Wire"));
        assert_eq!(entries[2].title.as_deref(), Some("Bonds slip"));
    }

    #[test]
    fn recovery_respects_max_items() {
        let entries = parse_entries(BROKEN_MIDDLE.as_bytes(), 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].link.as_deref(), Some("https://example.com/2"));
    }

    #[test]
    fn recovery_keeps_namespaces_from_root() {
        let xml = r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/"><channel><title>Q&A</title>
<item><title>Dated</title><dc:date>2025-10-13T09:30:00Z</dc:date></item></channel></rss>"#;
        let entries = parse_entries(xml.as_bytes(), 5).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].published.as_deref(), Some("2025-10-13T09:30:00Z"));
    }

    #[test]
    fn nothing_recoverable_is_an_error() {
        let err = parse_entries(b"<html><body>oops</body></html>", 5).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        let all_bad = r#"<rss version="2.0"><channel><item><title>A & B</title></item></channel></rss>"#;
        assert!(parse_entries(all_bad.as_bytes(), 5).is_err());
    }

    #[test]
    fn items_tag_is_not_an_item() {
        assert_eq!(find_open("<items><item>x</item>", "item", 0), Some(7));
        assert_eq!(elements("<items>a</items><item>b</item>", "item"), vec!["<item>b</item>"]);
    }
}
