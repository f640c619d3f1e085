//! Line-oriented REPL front end for the reckoner session engine.

use anyhow::Context;
use clap::Parser;
use reckoner::core::{CalculationRecord, OperationKind};
use reckoner::notify::{AutoSaveObserver, LoggingObserver};
use reckoner::persistence::HistoryStore;
use reckoner::{SessionConfig, SessionController};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interactive calculator with undo/redo history and autosave.
#[derive(Parser, Debug)]
#[command(name = "reckoner", version)]
struct Cli {
    /// Directory for the commit log file
    #[arg(long, env = "RECKONER_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Commit log file name, inside the log directory
    #[arg(long, env = "RECKONER_LOG_FILE", default_value = "calculations.log")]
    log_file: String,

    /// Directory for persisted history files
    #[arg(long, env = "RECKONER_HISTORY_DIR", default_value = "history")]
    history_dir: PathBuf,

    /// History file name, inside the history directory
    #[arg(
        long,
        env = "RECKONER_HISTORY_FILE",
        default_value = "calculation_history.csv"
    )]
    history_file: String,

    /// Bound on visible history entries
    #[arg(long, env = "RECKONER_MAX_HISTORY_SIZE", default_value_t = 100)]
    max_history_size: usize,

    /// Save history after every commit
    #[arg(
        long,
        env = "RECKONER_AUTO_SAVE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    auto_save: bool,

    /// Decimal places results are rounded to
    #[arg(long, env = "RECKONER_PRECISION", default_value_t = 4)]
    precision: u32,

    /// Magnitude ceiling on accepted operands
    #[arg(long, env = "RECKONER_MAX_INPUT_VALUE", default_value_t = 1e9)]
    max_input_value: f64,
}

impl Cli {
    fn into_config(self) -> SessionConfig {
        SessionConfig {
            log_dir: self.log_dir,
            log_file_name: self.log_file,
            history_dir: self.history_dir,
            history_file_name: self.history_file,
            max_history_size: self.max_history_size,
            auto_save: self.auto_save,
            precision: self.precision,
            max_input_value: self.max_input_value,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.into_config();
    config
        .ensure_directories()
        .context("failed to create log/history directories")?;

    let mut session = SessionController::new(config.clone());
    session.subscribe(Box::new(LoggingObserver::new(
        config.log_file_path(),
        config.precision,
    )));
    session.subscribe(Box::new(AutoSaveObserver::new(
        HistoryStore::new(config.history_file_path()),
        config.auto_save,
    )));

    tracing::info!("session started");
    run_repl(&mut session)
}

fn run_repl(session: &mut SessionController) -> anyhow::Result<()> {
    println!("Welcome to reckoner.");
    println!("Type 'help' for available commands or 'exit' to quit.");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!(">>> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if !dispatch(session, line) {
            break;
        }
    }

    tracing::info!("session ended");
    println!("Goodbye.");
    Ok(())
}

/// Handle one input line; returns false when the session should end.
fn dispatch(session: &mut SessionController, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        Some(word) => word.to_ascii_lowercase(),
        None => return true,
    };
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "exit" => return false,
        "help" => print_help(),
        "history" => print_history(session.history()),
        "clear" => {
            session.clear();
            println!("History cleared.");
        }
        "undo" => match session.undo() {
            Ok(Some(top)) => println!("Undone. Now at: {top}"),
            Ok(None) => println!("Undone. History is empty."),
            Err(error) => println!("Error: {error}"),
        },
        "redo" => match session.redo() {
            Ok(record) => println!("Redone: {record}"),
            Err(error) => println!("Error: {error}"),
        },
        "save" => match session.save() {
            Ok(count) => println!(
                "Saved {count} record(s) to {}",
                session.history_path().display()
            ),
            Err(error) => println!("Error: {error}"),
        },
        "load" => match session.load() {
            Ok(count) => {
                println!(
                    "Loaded {count} record(s) from {}",
                    session.history_path().display()
                );
                print_history(session.history());
            }
            Err(error) => println!("Error: {error}"),
        },
        _ => run_calculation(session, &command, &args),
    }
    true
}

fn run_calculation(session: &mut SessionController, command: &str, args: &[&str]) {
    let kind: OperationKind = match command.parse() {
        Ok(kind) => kind,
        Err(_) => {
            println!("Unknown command: '{command}'. Type 'help' for the command list.");
            return;
        }
    };

    let (left, right) = match parse_operands(args) {
        Ok(operands) => operands,
        Err(message) => {
            println!("Error: {message}");
            return;
        }
    };

    match session.evaluate(kind, left, right) {
        Ok(outcome) => {
            println!("Result: {}", outcome.record.result);
            for failure in &outcome.observer_failures {
                println!("Warning: {failure}");
            }
        }
        Err(error) => println!("Error: {error}"),
    }
}

fn parse_operands(args: &[&str]) -> Result<(f64, f64), String> {
    if args.len() != 2 {
        return Err("Exactly two numerical arguments are required.".to_string());
    }
    let left: f64 = args[0]
        .parse()
        .map_err(|_| "Both arguments must be valid numbers.".to_string())?;
    let right: f64 = args[1]
        .parse()
        .map_err(|_| "Both arguments must be valid numbers.".to_string())?;
    Ok((left, right))
}

fn print_history(records: &[CalculationRecord]) {
    if records.is_empty() {
        println!("No history to display.");
        return;
    }
    println!("Calculation history:");
    for record in records {
        println!("  {}. {record}", record.sequence);
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  add|subtract|multiply|divide|power|root|modulus|int_divide|percent|abs_diff <a> <b>");
    println!("  history        Display the visible calculation history");
    println!("  clear          Discard the session history");
    println!("  undo / redo    Step backwards or forwards through history");
    println!("  save / load    Write or restore the history file");
    println!("  help           Show this message");
    println!("  exit           Leave the session");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_require_exactly_two_arguments() {
        assert!(parse_operands(&["1"]).is_err());
        assert!(parse_operands(&["1", "2", "3"]).is_err());
        assert_eq!(parse_operands(&["10", "5"]), Ok((10.0, 5.0)));
    }

    #[test]
    fn non_numeric_operands_are_rejected() {
        assert!(parse_operands(&["ten", "5"]).is_err());
        assert!(parse_operands(&["10", "five"]).is_err());
        assert_eq!(parse_operands(&["-2.5", "1e3"]), Ok((-2.5, 1000.0)));
    }

    #[test]
    fn exit_stops_the_loop_and_other_commands_continue() {
        let mut session = SessionController::new(SessionConfig::default());
        assert!(!dispatch(&mut session, "exit"));
        assert!(dispatch(&mut session, "add 10 5"));
        assert!(dispatch(&mut session, "bogus 1 2"));
        assert_eq!(session.history().len(), 1);
    }
}
