use std::str::FromStr;

use anyhow::{bail, Error, Result};

use super::AppState;
use crate::ordering::parse_primary;

pub const USAGE: &str = "commands: select <category> | deselect <category> | toggle <category> | \
primary <category|none> | refresh | reset | help | quit";

/// A user event, parsed from one line of input. Applying it mutates the
/// session; the caller redraws afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Select(String),
    Deselect(String),
    /// Bubble click.
    Toggle(String),
    Primary(Option<String>),
    Refresh,
    Reset,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw { notice: Option<String> },
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };
        let needs_arg = |rest: &str| -> Result<String> {
            if rest.is_empty() { bail!("'{}' needs a category", verb) }
            Ok(rest.to_string())
        };
        let cmd = match verb.to_ascii_lowercase().as_str() {
            "select" | "add" => SessionCommand::Select(needs_arg(rest)?),
            "deselect" | "remove" => SessionCommand::Deselect(needs_arg(rest)?),
            "toggle" | "click" => SessionCommand::Toggle(needs_arg(rest)?),
            "primary" | "focus" => SessionCommand::Primary(parse_primary(rest)),
            "refresh" | "r" => SessionCommand::Refresh,
            "reset" => SessionCommand::Reset,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            "" => bail!("empty command; {}", USAGE),
            other => bail!("unknown command '{}'; {}", other, USAGE),
        };
        Ok(cmd)
    }
}

/// Apply one command. Unknown labels are rejected before anything changes.
pub fn apply(state: &mut AppState, cmd: SessionCommand) -> Result<Outcome> {
    let notice = match cmd {
        SessionCommand::Select(input) => {
            let label = state.resolve_label(&input)?;
            state.selection.select(label.to_string());
            None
        }
        SessionCommand::Deselect(input) => {
            let label = state.resolve_label(&input)?;
            state.selection.deselect(label);
            None
        }
        SessionCommand::Toggle(input) => {
            let label = state.resolve_label(&input)?;
            state.selection.toggle(label);
            None
        }
        SessionCommand::Primary(input) => {
            let primary = match input {
                Some(p) => Some(state.resolve_label(&p)?.to_string()),
                None => None,
            };
            state.selection.set_primary(primary);
            None
        }
        SessionCommand::Refresh => Some("News refreshed! Scroll down to view the latest top 5 in each category.".to_string()),
        SessionCommand::Reset => {
            state.reset();
            Some("Session reset.".to_string())
        }
        SessionCommand::Help => return Ok(Outcome::Help),
        SessionCommand::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Redraw { notice })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRegistry;
    use crate::config::HubConfig;

    fn state() -> AppState { AppState::new(&HubConfig::default(), CategoryRegistry::builtin(false)) }

    #[test]
    fn parses_verbs_and_multiword_labels() {
        assert_eq!("select Champions League".parse::<SessionCommand>().unwrap(), SessionCommand::Select("Champions League".into()));
        assert_eq!("  TOGGLE   Tech / AI ".parse::<SessionCommand>().unwrap(), SessionCommand::Toggle("Tech / AI".into()));
        assert_eq!("primary none".parse::<SessionCommand>().unwrap(), SessionCommand::Primary(None));
        assert_eq!("primary World".parse::<SessionCommand>().unwrap(), SessionCommand::Primary(Some("World".into())));
        assert_eq!("r".parse::<SessionCommand>().unwrap(), SessionCommand::Refresh);
        assert_eq!("quit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("select".parse::<SessionCommand>().is_err());
        assert!("".parse::<SessionCommand>().is_err());
        let err = "dance EPL".parse::<SessionCommand>().unwrap_err().to_string();
        assert!(err.contains("unknown command 'dance'"));
    }

    #[test]
    fn toggle_updates_selection() {
        let mut st = state();
        let out = apply(&mut st, SessionCommand::Toggle("world".into())).unwrap();
        assert_eq!(out, Outcome::Redraw { notice: None });
        assert!(st.selection.is_selected("World"));
        apply(&mut st, SessionCommand::Toggle("World".into())).unwrap();
        assert!(!st.selection.is_selected("World"));
    }

    #[test]
    fn unknown_label_leaves_state_untouched() {
        let mut st = state();
        let before = st.selection.clone();
        assert!(apply(&mut st, SessionCommand::Select("Cricket".into())).is_err());
        assert!(apply(&mut st, SessionCommand::Primary(Some("Cricket".into()))).is_err());
        assert_eq!(st.selection, before);
    }

    #[test]
    fn primary_can_be_cleared() {
        let mut st = state();
        apply(&mut st, SessionCommand::Primary(None)).unwrap();
        assert_eq!(st.selection.primary(), None);
        apply(&mut st, SessionCommand::Primary(Some("nfl".into()))).unwrap();
        assert_eq!(st.selection.primary(), Some("NFL"));
    }

    #[test]
    fn refresh_and_quit_outcomes() {
        let mut st = state();
        match apply(&mut st, SessionCommand::Refresh).unwrap() {
            Outcome::Redraw { notice: Some(n) } => assert!(n.starts_with("News refreshed!")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(apply(&mut st, SessionCommand::Quit).unwrap(), Outcome::Quit);
        assert_eq!(apply(&mut st, SessionCommand::Help).unwrap(), Outcome::Help);
    }
}
