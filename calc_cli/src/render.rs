//! Text rendering of evaluations and forms.

use calc_core::formulas::{Evaluation, EMPTY_RESULT};
use calc_core::numeric::format_result;

use serde_json::json;

use crate::session::{Form, Reply, Tab};

/// Multi-line report for one evaluation.
pub fn evaluation(eval: &Evaluation) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}: {}", eval.kind().display_name(), eval.result_text()));
    if let Some(label) = eval.judgement_label() {
        out.push_str(&format!(" {}", label));
    }
    out.push('\n');

    if let Evaluation::Sulfate { report, .. } = eval {
        out.push_str(&format!("  a = {}\n  b = {}\n", format_result(report.a), format_result(report.b)));
        // the verdict is still useful when G failed
        if report.dosage.is_err() {
            if let Some(j) = report.judgement {
                out.push_str(&format!("  judgement: {}\n", j.label()));
            }
        }
    }

    let message = eval.message();
    if !message.is_empty() {
        out.push_str(&format!("  error: {}\n", message));
    }
    out
}

/// Output after a reset: blank result, no message.
pub fn cleared(tab: Tab) -> String {
    format!("{}: {}\n", tab.formula().display_name(), EMPTY_RESULT)
}

/// Current field texts of a form, in the formula's field order.
pub fn form(form: &Form) -> String {
    let mut out = format!("[{}] {}\n", form.tab, form.tab.formula().display_name());
    for field in form.tab.formula().fields() {
        out.push_str(&format!("  {:<5} = {}\n", field, form.fields.get(field).unwrap_or("")));
    }
    if let Some((a, b)) = form.differences() {
        out.push_str(&format!("  {:<5} = {}\n  {:<5} = {}\n", "a", a, "b", b));
    }
    out
}

pub const HELP: &str = "\
Commands:
  tab <air|ssa|as>     switch formula
  set <field> <value>  edit a field (recalculates)
  flip <field>         toggle the sign of a field (recalculates)
  calc                 recalculate the active tab
  reset                restore the active tab's defaults
  show                 list the active tab's fields
  quit                 leave
";

/// JSON rendering of a shell reply; `None` for `Quit`.
pub fn reply_json(reply: &Reply) -> Result<Option<String>, serde_json::Error> {
    let value = match reply {
        Reply::Evaluated(eval) => serde_json::to_value(eval)?,
        Reply::Cleared(tab) => json!({ "cleared": tab.key(), "result": null }),
        Reply::Form(form) => serde_json::to_value(form)?,
        Reply::Help => json!({ "help": HELP }),
        Reply::Quit => return Ok(None),
    };
    serde_json::to_string_pretty(&value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Form;

    #[test]
    fn test_air_report() {
        let text = evaluation(&Form::new(Tab::Air).evaluate());
        assert_eq!(text, "Air Content: 100.000000\n");
    }

    #[test]
    fn test_error_report() {
        let mut form = Form::new(Tab::Ssa);
        form.set("e", "1").unwrap();
        let text = evaluation(&form.evaluate());
        assert!(text.starts_with("Specific Surface Area: —\n"));
        assert!(text.contains("error: (1−e) is 0, cannot calculate."));
    }

    #[test]
    fn test_sulfate_report() {
        let mut form = Form::new(Tab::Sulfate);
        for (field, text) in [("cs1", "40"), ("cs2", "46"), ("cs3", "47"), ("so3", "2"), ("d", "0.5")] {
            form.set(field, text).unwrap();
        }
        // a = 6, b = 1 → ratio 6 ≥ 2
        let text = evaluation(&form.evaluate());
        assert!(text.starts_with("Anhydrous Sulfate: "));
        assert!(text.contains("(Acceptable)"));
        assert!(text.contains("a = 6.000000"));
    }

    #[test]
    fn test_sulfate_judgement_without_dosage() {
        let text = evaluation(&Form::new(Tab::Sulfate).evaluate());
        assert!(text.contains("judgement: (Acceptable)"));
        assert!(text.contains("error: a−b is 0"));
    }

    #[test]
    fn test_form_listing() {
        let text = form(&Form::new(Tab::Sulfate));
        assert!(text.starts_with("[as] Anhydrous Sulfate\n"));
        assert!(text.contains("  so3   = 0\n"));
        assert!(text.contains("  a     = 0\n"));
    }

    #[test]
    fn test_cleared() {
        assert_eq!(cleared(Tab::Air), "Air Content: —\n");
    }

    #[test]
    fn test_every_reply_has_json() {
        let replies = [
            Reply::Evaluated(Form::new(Tab::Air).evaluate()),
            Reply::Cleared(Tab::Ssa),
            Reply::Form(Form::new(Tab::Sulfate)),
            Reply::Help,
        ];
        for reply in &replies {
            let text = reply_json(reply).unwrap().expect("json for every reply but quit");
            assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
        }
        assert_eq!(reply_json(&Reply::Quit).unwrap(), None);
    }

    #[test]
    fn test_cleared_json() {
        let text = reply_json(&Reply::Cleared(Tab::Sulfate)).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["cleared"], "as");
        assert!(value["result"].is_null());
    }
}
