use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Render;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Order, Category, Bubbles }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Order => "order", Phase::Category => "category", Phase::Bubbles => "bubbles" } }
    fn span(&self) -> Span { match self { Phase::Order => info_span!("order"), Phase::Category => info_span!("category"), Phase::Bubbles => info_span!("bubbles") } }
}

impl OpMarker for Render {
    const NAME: &'static str = "render";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("render") }
}
