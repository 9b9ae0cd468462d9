use chrono::Utc;

use super::view::{CategorySection, DashboardView, PICK_PROMPT};
use super::AppState;
use crate::headlines::{FeedSource, Fetched, HeadlineFetcher};
use crate::headlines::types::NO_NEWS;
use crate::telemetry;
use crate::telemetry::ops::render::Phase as RenderPhase;

/// One display cycle: order the categories, fetch each in turn, count a view
/// per rendered category and size the bubbles. A failing category only
/// empties its own section.
pub async fn render_cycle<S: FeedSource>(
    state: &mut AppState,
    fetcher: &HeadlineFetcher<S>,
    max_items: usize,
) -> DashboardView {
    let log = telemetry::render();
    let _g = log.root_span_kv([
        ("selected", state.selection.selected().join("|")),
        ("primary", format!("{:?}", state.selection.primary())),
        ("max", max_items.to_string()),
    ]).entered();

    let order = { let _s = log.span(&RenderPhase::Order).entered(); state.selection.effective_order() };

    let mut notices: Vec<String> = Vec::new();
    let mut sections: Vec<CategorySection> = Vec::with_capacity(order.len());

    if order.is_empty() {
        notices.push(PICK_PROMPT.to_string());
    }

    for label in &order {
        let _s = log.span_kv(&RenderPhase::Category, [("label", label.clone())]).entered();
        let fetched = match state.registry.query(label) {
            Some(query) => {
                log.info(format!("Fetching top {} news for {}...", max_items, label));
                fetcher.fetch(query, max_items).await
            }
            // labels are validated on the way in; this only guards a stale selection
            None => Fetched::failed(label, format!("Unknown category '{}'", label)),
        };
        let views = state.engagement.record_view(label);
        log.category_summary(label, fetched.articles.len(), fetched.is_failed(), views);

        let notice = (!fetched.is_failed() && fetched.articles.is_empty()).then(|| NO_NEWS.to_string());
        sections.push(CategorySection { label: label.clone(), views, fetched, notice });
    }

    state.last_refresh = Some(Utc::now());

    let bubbles = {
        let _s = log.span(&RenderPhase::Bubbles).entered();
        state.engagement.bubbles(&state.registry, &state.selection)
    };

    let articles: usize = sections.iter().map(|s| s.fetched.articles.len()).sum();
    let warnings = sections.iter().filter(|s| s.fetched.is_failed()).count();
    log.totals(sections.len(), articles, warnings);

    DashboardView {
        notices,
        order,
        primary: state.selection.primary().map(str::to_string),
        sections,
        bubbles,
        last_refresh: state.last_refresh,
    }
}
