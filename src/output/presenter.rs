use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta};

/// Human rendition of a result, used by the text presenter.
pub trait TextView {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, view: &dyn TextView, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, _view: &dyn TextView, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter;
impl Presenter for TextPresenter {
    fn emit(&self, _env: &Envelope, view: &dyn TextView, w: &mut dyn Write) -> io::Result<()> {
        view.write_text(w)
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter }
    }

    /// `started` marks the beginning of the operation being reported;
    /// `meta.duration_ms` is measured from it.
    pub fn emit<T: Serialize + TextView>(&self, op: &'static str, view: &T, started: Instant) -> anyhow::Result<()> {
        let mut out = io::stdout();
        self.emit_to(op, view, started, &mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn emit_to<T: Serialize + TextView>(
        &self,
        op: &'static str,
        view: &T,
        started: Instant,
        w: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let meta = Meta { duration_ms: Some(started.elapsed().as_millis()) };
        let env = Envelope::result(op, view, Some(meta))?;
        self.presenter.emit(&env, view, w)?;
        Ok(())
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
