use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::category::CategoryRegistry;
use crate::config::HubConfig;
use crate::headlines::HeadlineFetcher;
use crate::output::Emitter;
use crate::session::{self, AppState, Outcome, SessionCommand, USAGE};
use crate::telemetry::{self};
use crate::telemetry::ops::session::Phase as SessionPhase;

/// hub dash: interactive session, one command per line on stdin
#[derive(Args)]
pub struct DashCmd {
    #[arg(long)]
    pub max: Option<usize>,
}

pub async fn run(cfg: &HubConfig, emitter: &Emitter, args: DashCmd) -> Result<()> {
    let log = telemetry::session();
    let _g = log.root_span().entered();

    let max = args.max.unwrap_or(cfg.max_items);
    let mut state = AppState::new(cfg, CategoryRegistry::builtin(cfg.with_stocks));
    let fetcher = HeadlineFetcher::from_config(cfg)?;

    let started = Instant::now();
    let view = { let _s = log.span(&SessionPhase::Redraw).entered(); session::render_cycle(&mut state, &fetcher, max).await };
    emitter.emit("render", &view, started)?;
    eprintln!("{}", USAGE);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() { continue; }
        let outcome = {
            let _s = log.span_kv(&SessionPhase::Command, [("line", line.clone())]).entered();
            line.parse::<SessionCommand>().and_then(|cmd| session::apply(&mut state, cmd))
        };
        match outcome {
            Ok(Outcome::Redraw { notice }) => {
                let started = Instant::now();
                let _s = log.span(&SessionPhase::Redraw).entered();
                let mut view = session::render_cycle(&mut state, &fetcher, max).await;
                if let Some(n) = notice { view.push_notice(n); }
                emitter.emit("render", &view, started)?;
            }
            Ok(Outcome::Help) => eprintln!("{}", USAGE),
            Ok(Outcome::Quit) => break,
            Err(err) => log.warn(format!("{err}")),
        }
    }
    log.info("👋 session closed");
    Ok(())
}
