use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fxcalc::{
  evaluate_with_limits, format_number, AngleMode, Limits, Session, TrigKey,
};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Increase log output (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a single expression
  Eval {
    /// The expression to evaluate, e.g. "sin(30) + 5!"
    expression: String,

    /// Angle unit for trigonometric functions (deg or rad)
    #[arg(short, long, default_value = "deg")]
    angle: AngleMode,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// Maximum nesting depth
    #[arg(long, default_value_t = Limits::default().max_depth)]
    max_depth: usize,

    /// Maximum expression length in characters
    #[arg(long, default_value_t = Limits::default().max_length)]
    max_length: usize,
  },
  /// Interactive calculator reading lines from stdin
  Repl {
    /// Initial angle unit (deg or rad)
    #[arg(short, long, default_value = "deg")]
    angle: AngleMode,
  },
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let level = match cli.verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or(level),
  )
  .init();

  match cli.command {
    Commands::Eval {
      expression,
      angle,
      json,
      max_depth,
      max_length,
    } => {
      let limits = Limits {
        max_depth,
        max_length,
      };
      let result = evaluate_with_limits(&expression, angle, limits);
      if json {
        let output = match &result {
          Ok(value) => json!({
            "expression": expression,
            "value": value,
            "text": format_number(*value),
          }),
          Err(e) => json!({
            "expression": expression,
            "error": { "kind": e.kind(), "message": e.to_string() },
          }),
        };
        println!("{}", output);
      } else {
        match &result {
          Ok(value) => println!("{}", format_number(*value)),
          Err(e) => eprintln!("Error: {}", e),
        }
      }
      if result.is_err() {
        std::process::exit(1);
      }
    }
    Commands::Repl { angle } => {
      let stdin = io::stdin();
      let stdout = io::stdout();
      repl(stdin.lock(), stdout.lock(), Session::with_angle_mode(angle))?;
    }
  }

  Ok(())
}

const REPL_HELP: &str = "\
Type an expression and press enter to evaluate it. After a result, input
continues from it (e.g. \"+1\"). Commands:
  :deg :rad :mode     angle unit
  :shift              toggle SHIFT (next trig key inserts the inverse)
  :sin :cos :tan      trig keys
  :sq :cube           append ^2 or ^3
  :=                  evaluate the pending expression
  :m+ :m- :mc :mr     memory add/subtract last result, clear, recall
  :ans :neg           insert last result, toggle sign
  :del :c :ac         delete last char, clear entry, clear all
  :state :help :quit";

fn repl<R: BufRead, W: Write>(
  input: R,
  mut out: W,
  mut session: Session,
) -> anyhow::Result<()> {
  writeln!(out, "fxcalc ({}), :help for commands", session.angle_mode())?;

  for line in input.lines() {
    let line = line.context("failed to read input")?;
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    if let Some(command) = line.strip_prefix(':') {
      match command {
        "quit" | "q" | "exit" => break,
        "help" | "h" => writeln!(out, "{}", REPL_HELP)?,
        "deg" => session.set_angle_mode(AngleMode::Degrees),
        "rad" => session.set_angle_mode(AngleMode::Radians),
        "mode" => {
          let mode = session.toggle_angle_mode();
          writeln!(out, "{}", mode)?;
        }
        "shift" => {
          let shift = session.toggle_shift();
          writeln!(out, "SHIFT {}", shift)?;
        }
        "sin" | "cos" | "tan" => {
          let key: TrigKey = command.parse()?;
          session.press_trig(key);
          writeln!(out, "{}", session.expression())?;
        }
        "sq" | "cube" => {
          session.push_str(if command == "sq" { "^2" } else { "^3" });
          writeln!(out, "{}", session.expression())?;
        }
        "=" => equals(&mut out, &mut session)?,
        "m+" => {
          if !session.memory_add_last() {
            writeln!(out, "no last result")?;
          }
        }
        "m-" => {
          if !session.memory_subtract_last() {
            writeln!(out, "no last result")?;
          }
        }
        "mc" => session.memory_clear(),
        "mr" => {
          session.recall_memory();
          writeln!(out, "{}", session.expression())?;
        }
        "ans" => {
          if session.insert_ans() {
            writeln!(out, "{}", session.expression())?;
          } else {
            writeln!(out, "no last result")?;
          }
        }
        "neg" => {
          session.toggle_sign();
          writeln!(out, "{}", session.expression())?;
        }
        "del" => {
          session.delete_last();
          writeln!(out, "{}", session.expression())?;
        }
        "c" => session.clear_entry(),
        "ac" => session.all_clear(),
        "state" => writeln!(
          out,
          "expression: {}\nangle: {}  shift: {}  memory: {}  ans: {}",
          session.expression(),
          session.angle_mode(),
          session.shift(),
          format_number(session.memory_read()),
          session
            .last_result()
            .map(|last| last.text.as_str())
            .unwrap_or("-"),
        )?,
        other => writeln!(out, "unknown command :{}", other)?,
      }
      continue;
    }

    session.push_str(line);
    equals(&mut out, &mut session)?;
  }

  Ok(())
}

fn equals<W: Write>(out: &mut W, session: &mut Session) -> io::Result<()> {
  match session.equals() {
    Ok(value) => writeln!(out, "= {}", format_number(value)),
    Err(e) => {
      session.clear_entry();
      writeln!(out, "Error: {}", e)
    }
  }
}
