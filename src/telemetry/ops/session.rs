use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Session;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Command, Redraw }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Command => "command", Phase::Redraw => "redraw" } }
    fn span(&self) -> Span { match self { Phase::Command => info_span!("command"), Phase::Redraw => info_span!("redraw") } }
}

impl OpMarker for Session {
    const NAME: &'static str = "session";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("session") }
}
