use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Fetch;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Request, Parse, Normalize }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Request => "request",
        Phase::Parse => "parse",
        Phase::Normalize => "normalize",
    }}
    fn span(&self) -> Span { match self {
        Phase::Request => info_span!("request"),
        Phase::Parse => info_span!("parse"),
        Phase::Normalize => info_span!("normalize"),
    }}
}

impl OpMarker for Fetch {
    const NAME: &'static str = "fetch";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("fetch") }
}
