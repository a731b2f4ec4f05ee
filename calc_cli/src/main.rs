//! # Cemcalc CLI
//!
//! Command-line front end for the calc_core formulas. One-shot subcommands
//! evaluate a single formula; `shell` keeps the three forms in memory and
//! recalculates as fields are edited.

mod logging;
mod render;
mod session;

use std::io::{self, BufRead, Write};

use calc_core::equations::generate_equations_markdown;
use calc_core::formulas::Evaluation;
use calc_core::numeric::negate;
use clap::{ArgAction, Parser, Subcommand};
use log::info;

use session::{Command, Form, Reply, Session, SessionError, Tab};

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Cement test calculator: air content, specific surface area, anhydrous sulfate", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the JSON report instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Field values are passed through as text; unset fields keep the form default.
#[derive(Subcommand)]
enum Commands {
    /// Mortar air content (%)
    Air {
        /// Water quantity [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        w: Option<String>,
        /// Specific gravity of cement [default: 1]
        #[arg(long = "C", allow_hyphen_values = true)]
        c: Option<String>,
        /// Specific gravity of sand [default: 1]
        #[arg(long = "S", allow_hyphen_values = true)]
        s: Option<String>,
        /// Admixture percentage [default: 0]
        #[arg(long = "P", allow_hyphen_values = true)]
        p: Option<String>,
    },

    /// Specific surface area
    Ssa {
        /// Reference specific surface [default: 1]
        #[arg(long = "S0", allow_hyphen_values = true)]
        s0: Option<String>,
        /// Reference density [default: 1]
        #[arg(long, allow_hyphen_values = true)]
        rho0: Option<String>,
        /// Sample density [default: 1]
        #[arg(long, allow_hyphen_values = true)]
        rho: Option<String>,
        /// Reference porosity [default: 0.5]
        #[arg(long, allow_hyphen_values = true)]
        e0: Option<String>,
        /// Sample porosity [default: 0.5]
        #[arg(long, allow_hyphen_values = true)]
        e: Option<String>,
        /// Sample flow time [default: 1]
        #[arg(long, allow_hyphen_values = true)]
        t: Option<String>,
        /// Reference flow time [default: 1]
        #[arg(long, allow_hyphen_values = true)]
        t0: Option<String>,
    },

    /// Anhydrous sulfate dosage and retest judgement
    Sulfate {
        /// First strength reading [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        cs1: Option<String>,
        /// Second strength reading [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        cs2: Option<String>,
        /// Third strength reading [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        cs3: Option<String>,
        /// SO3 step (%) [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        so3: Option<String>,
        /// Offset [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        d: Option<String>,
    },

    /// Flip the sign of a value the way the ± button does
    Negate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Print the equations reference (markdown)
    Equations {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Interactive session over all three forms
    Shell,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match cli.command {
        Commands::Air { w, c, s, p } => {
            run_formula(Tab::Air, [("w", w), ("C", c), ("S", s), ("P", p)], cli.json)
        }
        Commands::Ssa { s0, rho0, rho, e0, e, t, t0 } => run_formula(
            Tab::Ssa,
            [("S0", s0), ("rho0", rho0), ("rho", rho), ("e0", e0), ("e", e), ("t", t), ("t0", t0)],
            cli.json,
        ),
        Commands::Sulfate { cs1, cs2, cs3, so3, d } => run_formula(
            Tab::Sulfate,
            [("cs1", cs1), ("cs2", cs2), ("cs3", cs3), ("so3", so3), ("d", d)],
            cli.json,
        ),
        Commands::Negate { value } => {
            println!("{}", negate(&value));
            Ok(true)
        }
        Commands::Equations { output } => write_equations(output.as_deref()).map(|()| true),
        Commands::Shell => run_shell(cli.json).map(|()| true),
    };

    match outcome {
        Ok(true) => {}
        // the report already carries the diagnostic
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Evaluate one form; `Ok(false)` when the formula rejected its inputs.
fn run_formula<const N: usize>(
    tab: Tab,
    overrides: [(&str, Option<String>); N],
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let eval = evaluate_form(tab, overrides)?;
    print_evaluation(&eval, json)?;
    Ok(exit_code(&eval) == 0)
}

/// Start from the tab's defaults and apply only the fields given on the command line.
fn evaluate_form<const N: usize>(
    tab: Tab,
    overrides: [(&str, Option<String>); N],
) -> Result<Evaluation, SessionError> {
    let mut form = Form::new(tab);
    for (field, value) in overrides {
        if let Some(text) = value {
            form.set(field, &text)?;
        }
    }
    Ok(form.evaluate())
}

/// Process status for a one-shot evaluation: 1 when no result was produced.
fn exit_code(eval: &Evaluation) -> i32 {
    if eval.value().is_ok() {
        0
    } else {
        1
    }
}

fn print_evaluation(eval: &Evaluation, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(eval)?);
    } else {
        print!("{}", render::evaluation(eval));
    }
    Ok(())
}

fn write_equations(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = generate_equations_markdown();
    if let Some(path) = output {
        std::fs::write(path, &markdown)?;
        info!("wrote {} bytes to {}", markdown.len(), path);
        println!("Equations reference written to {}", path);
    } else {
        print!("{}", markdown);
    }
    Ok(())
}

fn run_shell(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if !json {
        println!("Cemcalc - type 'help' for commands");
    }
    print_evaluation(&session.form(session.active()).evaluate(), json)?;

    loop {
        if !json {
            print!("[{}]> ", session.active());
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = match Command::parse(&line).and_then(|cmd| session.apply(cmd)) {
            Ok(reply) => reply,
            Err(e) if json => {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
                continue;
            }
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if json {
            match render::reply_json(&reply)? {
                Some(text) => println!("{}", text),
                None => break,
            }
            continue;
        }

        match reply {
            Reply::Evaluated(eval) => print!("{}", render::evaluation(&eval)),
            Reply::Cleared(tab) => print!("{}", render::cleared(tab)),
            Reply::Form(form) => print!("{}", render::form(&form)),
            Reply::Help => print!("{}", render::HELP),
            Reply::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flags_keep_defaults() {
        let eval = evaluate_form(Tab::Air, [("w", None), ("C", None), ("S", None), ("P", None)]).unwrap();
        assert_eq!(eval.result_text(), "100.000000");
        assert_eq!(exit_code(&eval), 0);
    }

    #[test]
    fn test_override_applies_on_top_of_defaults() {
        let eval = evaluate_form(Tab::Ssa, [("t", Some("4".to_string())), ("t0", None)]).unwrap();
        assert_eq!(eval.result_text(), "2.000000");
    }

    #[test]
    fn test_rejected_input_exits_1() {
        let eval = evaluate_form(Tab::Air, [("C", Some("0".to_string()))]).unwrap();
        assert_eq!(eval.message(), "C cannot be 0. (337.5/C)");
        assert_eq!(exit_code(&eval), 1);

        let eval = evaluate_form(Tab::Sulfate, [("cs1", None)]).unwrap();
        assert_eq!(exit_code(&eval), 1);
    }

    #[test]
    fn test_foreign_field_is_an_error() {
        let err = evaluate_form(Tab::Air, [("rho", Some("1".to_string()))]).unwrap_err();
        assert!(matches!(err, SessionError::UnknownField { .. }));
    }

    #[test]
    fn test_cli_parses_negative_values() {
        let cli = Cli::try_parse_from(["calc_cli", "--json", "air", "--P", "-500"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Air { p, w, .. } => {
                assert_eq!(p.as_deref(), Some("-500"));
                assert_eq!(w, None);
            }
            _ => panic!("expected the air subcommand"),
        }
    }
}
