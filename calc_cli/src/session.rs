//! Presentation state: which tab is active and what text sits in each field.
//!
//! The engine in `calc_core` is stateless; everything the user edits lives
//! here and is handed over as a [`RawInput`] on every calculation.

use std::fmt;

use calc_core::formulas::sulfate::difference;
use calc_core::formulas::{evaluate, Evaluation, FormulaKind};
use calc_core::numeric::{negate, RawInput};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Unknown tab '{0}' (expected air, ssa or as)")]
    UnknownTab(String),

    #[error("Field '{field}' does not belong to the {tab} tab")]
    UnknownField { tab: Tab, field: String },

    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// One tab per formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tab {
    Air,
    Ssa,
    Sulfate,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Air, Tab::Ssa, Tab::Sulfate];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Air => "air",
            Tab::Ssa => "ssa",
            Tab::Sulfate => "as",
        }
    }

    pub fn from_key(key: &str) -> Result<Tab, SessionError> {
        Tab::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| SessionError::UnknownTab(key.to_string()))
    }

    pub fn formula(&self) -> FormulaKind {
        match self {
            Tab::Air => FormulaKind::AirContent,
            Tab::Ssa => FormulaKind::SpecificSurface,
            Tab::Sulfate => FormulaKind::Sulfate,
        }
    }

    /// Field values restored by reset
    pub fn defaults(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Tab::Air => &[("w", "0"), ("C", "1"), ("S", "1"), ("P", "0")],
            Tab::Ssa => &[
                ("S0", "1"),
                ("rho0", "1"),
                ("rho", "1"),
                ("e0", "0.5"),
                ("e", "0.5"),
                ("t", "1"),
                ("t0", "1"),
            ],
            Tab::Sulfate => &[("cs1", "0"), ("cs2", "0"), ("cs3", "0"), ("so3", "0"), ("d", "0")],
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field texts for one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub tab: Tab,
    pub fields: RawInput,
}

impl Form {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            fields: tab.defaults().iter().copied().collect(),
        }
    }

    pub fn reset(&mut self) {
        *self = Form::new(self.tab);
    }

    fn check_field(&self, field: &str) -> Result<(), SessionError> {
        if self.tab.formula().fields().contains(&field) {
            Ok(())
        } else {
            Err(SessionError::UnknownField {
                tab: self.tab,
                field: field.to_string(),
            })
        }
    }

    pub fn set(&mut self, field: &str, text: &str) -> Result<(), SessionError> {
        self.check_field(field)?;
        self.fields.set(field, text);
        Ok(())
    }

    /// Flip the sign of a field in place; returns the new text
    pub fn toggle_sign(&mut self, field: &str) -> Result<String, SessionError> {
        self.check_field(field)?;
        let flipped = negate(self.fields.get(field).unwrap_or(""));
        self.fields.set(field, flipped.clone());
        Ok(flipped)
    }

    pub fn evaluate(&self) -> Evaluation {
        evaluate(self.tab.formula(), &self.fields)
    }

    /// Display text of the derived `a`, `b` fields on the sulfate tab.
    /// Blank when a difference is not finite.
    pub fn differences(&self) -> Option<(String, String)> {
        if self.tab != Tab::Sulfate {
            return None;
        }
        let show = |v: f64| if v.is_finite() { v.to_string() } else { String::new() };
        let cs1 = self.fields.number("cs1");
        let cs2 = self.fields.number("cs2");
        let cs3 = self.fields.number("cs3");
        let a = difference(cs2, cs1);
        let b = difference(cs3, cs2);
        Some((show(a), show(b)))
    }
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tab(Tab),
    Set { field: String, text: String },
    Flip(String),
    Calc,
    Reset,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, SessionError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "tab" if !rest.is_empty() => Ok(Command::Tab(Tab::from_key(rest)?)),
            "tab" => Err(SessionError::Usage("tab <air|ssa|as>")),
            "set" => match rest.split_once(char::is_whitespace) {
                Some((field, text)) => Ok(Command::Set {
                    field: field.to_string(),
                    text: text.trim().to_string(),
                }),
                // `set w` clears the field
                None if !rest.is_empty() => Ok(Command::Set {
                    field: rest.to_string(),
                    text: String::new(),
                }),
                None => Err(SessionError::Usage("set <field> <value>")),
            },
            "flip" if !rest.is_empty() => Ok(Command::Flip(rest.to_string())),
            "flip" => Err(SessionError::Usage("flip <field>")),
            "calc" | "" => Ok(Command::Calc),
            "reset" => Ok(Command::Reset),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(SessionError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the front end should display after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A fresh evaluation of the active tab
    Evaluated(Evaluation),
    /// Result cleared after a reset
    Cleared(Tab),
    Form(Form),
    Help,
    Quit,
}

/// All three forms plus the active tab.
#[derive(Debug, Clone)]
pub struct Session {
    active: Tab,
    forms: Vec<Form>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            active: Tab::Air,
            forms: Tab::ALL.into_iter().map(Form::new).collect(),
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn form(&self, tab: Tab) -> &Form {
        &self.forms[tab as usize]
    }

    fn form_mut(&mut self, tab: Tab) -> &mut Form {
        &mut self.forms[tab as usize]
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn apply(&mut self, command: Command) -> Result<Reply, SessionError> {
        let tab = self.active;
        match command {
            Command::Tab(t) => {
                self.select(t);
                Ok(Reply::Evaluated(self.form(t).evaluate()))
            }
            Command::Set { field, text } => {
                self.form_mut(tab).set(&field, &text)?;
                Ok(Reply::Evaluated(self.form(tab).evaluate()))
            }
            Command::Flip(field) => {
                self.form_mut(tab).toggle_sign(&field)?;
                Ok(Reply::Evaluated(self.form(tab).evaluate()))
            }
            Command::Calc => Ok(Reply::Evaluated(self.form(tab).evaluate())),
            Command::Reset => {
                self.form_mut(tab).reset();
                Ok(Reply::Cleared(tab))
            }
            Command::Show => Ok(Reply::Form(self.form(tab).clone())),
            Command::Help => Ok(Reply::Help),
            Command::Quit => Ok(Reply::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::formulas::Judgement;

    #[test]
    fn test_defaults_evaluate() {
        let session = Session::new();
        assert_eq!(session.form(Tab::Air).evaluate().result_text(), "100.000000");
        assert_eq!(session.form(Tab::Ssa).evaluate().result_text(), "1.000000");
        // a = b = 0 → a − b = 0
        let sulfate = session.form(Tab::Sulfate).evaluate();
        assert_eq!(sulfate.message(), "a−b is 0, cannot calculate.");
        assert_eq!(sulfate.judgement(), Some(Judgement::Acceptable));
    }

    #[test]
    fn test_tab_keys() {
        assert_eq!(Tab::from_key("AS").unwrap(), Tab::Sulfate);
        assert_eq!(Tab::from_key(" ssa ").unwrap(), Tab::Ssa);
        assert_eq!(Tab::from_key("x"), Err(SessionError::UnknownTab("x".to_string())));
    }

    #[test]
    fn test_set_and_reset() {
        let mut session = Session::new();
        let reply = session
            .apply(Command::Set { field: "C".to_string(), text: "0".to_string() })
            .unwrap();
        match reply {
            Reply::Evaluated(eval) => assert_eq!(eval.message(), "C cannot be 0. (337.5/C)"),
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(session.apply(Command::Reset).unwrap(), Reply::Cleared(Tab::Air));
        assert_eq!(session.form(Tab::Air).fields.get("C"), Some("1"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut session = Session::new();
        let err = session.apply(Command::Flip("rho".to_string())).unwrap_err();
        assert_eq!(
            err,
            SessionError::UnknownField { tab: Tab::Air, field: "rho".to_string() }
        );
    }

    #[test]
    fn test_flip_recomputes_active_tab() {
        let mut session = Session::new();
        session.select(Tab::Ssa);
        // t = -1 → t/t0 < 0
        match session.apply(Command::Flip("t".to_string())).unwrap() {
            Reply::Evaluated(eval) => {
                assert_eq!(eval.kind(), FormulaKind::SpecificSurface);
                assert_eq!(eval.result_text(), "—");
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(session.form(Tab::Ssa).fields.get("t"), Some("-1"));
        // other tabs untouched
        assert_eq!(session.form(Tab::Air).fields.get("w"), Some("0"));
    }

    #[test]
    fn test_toggle_sign_garbage_becomes_zero() {
        let mut form = Form::new(Tab::Air);
        form.set("w", "abc").unwrap();
        assert_eq!(form.toggle_sign("w").unwrap(), "0");
    }

    #[test]
    fn test_sulfate_differences() {
        let mut form = Form::new(Tab::Sulfate);
        form.set("cs1", "40").unwrap();
        form.set("cs2", "46").unwrap();
        form.set("cs3", "48").unwrap();
        assert_eq!(form.differences(), Some(("6".to_string(), "2".to_string())));

        form.set("cs2", "").unwrap();
        assert_eq!(form.differences(), Some((String::new(), String::new())));
        assert_eq!(Form::new(Tab::Air).differences(), None);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("tab ssa").unwrap(), Command::Tab(Tab::Ssa));
        assert_eq!(
            Command::parse("set w 1,250 ").unwrap(),
            Command::Set { field: "w".to_string(), text: "1,250".to_string() }
        );
        assert_eq!(
            Command::parse("set P").unwrap(),
            Command::Set { field: "P".to_string(), text: String::new() }
        );
        assert_eq!(Command::parse("flip e").unwrap(), Command::Flip("e".to_string()));
        assert_eq!(Command::parse("").unwrap(), Command::Calc);
        assert_eq!(Command::parse("QUIT").unwrap(), Command::Quit);
        assert_eq!(Command::parse("tab"), Err(SessionError::Usage("tab <air|ssa|as>")));
        assert!(matches!(Command::parse("frobnicate"), Err(SessionError::UnknownCommand(_))));
    }
}
