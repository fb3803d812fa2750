//! numbox-demo: drive a number box from the command line.
//!
//! Reads one command per line from stdin and prints the notifications each
//! command raises. `--help` lists the commands.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use numbox::{
    ConfigError, Culture, Key, LogLevel, Notification, NumberBox, NumberBoxConfig, NumberKind,
    RawNumber, Verdict,
};

const COMMANDS: &str = "\
commands (one per line on stdin):
  type <text>            type each character
  key <name>             press a key (up, down, left, right, home, end,
                         backspace, delete, space, or a single character)
  paste <text>           paste text over the selection
  select <start> <len>   set the selection
  up | down              step the value
  reset                  restore the default value
  focus | blur           gain or lose keyboard focus
  kind <name>            change representation (int, byte, double, ...)
  value|min|max|step|default <number|none>
  culture <name>         parsing culture (de-DE, invariant, ...)
  check on|off           toggle the check box
  show                   print text, selection and value";

#[derive(Parser)]
#[command(name = "numbox-demo")]
#[command(about = "Drive a number box with editing commands read from stdin", long_about = None)]
#[command(version, after_help = COMMANDS)]
struct Cli {
    /// Number box configuration (JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    log: LogLevel,
}

/// `none` (or nothing) clears, anything else is declared text.
fn raw_number(argument: &str) -> Option<RawNumber> {
    match argument.trim() {
        "" | "none" => None,
        text => Some(RawNumber::text(text)),
    }
}

fn execute(number_box: &mut NumberBox, line: &str) -> Result<Option<Verdict>, ConfigError> {
    let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
    let verdict = match command {
        "type" => {
            let mut verdict = Verdict::Accepted;
            for c in argument.chars() {
                verdict = number_box.preview_text_input(c);
                if !verdict.is_accepted() {
                    break;
                }
            }
            verdict
        }
        "key" => match Key::from_name(argument) {
            Some(key) => number_box.handle_key(key),
            None => {
                eprintln!("Unknown key '{}'", argument);
                return Ok(None);
            }
        },
        "paste" => number_box.paste(argument),
        "select" => {
            let mut numbers = argument.split_whitespace().map(str::parse::<usize>);
            match (numbers.next(), numbers.next()) {
                (Some(Ok(start)), Some(Ok(length))) => number_box.set_selection(start, length),
                _ => {
                    eprintln!("select expects <start> <length>");
                    return Ok(None);
                }
            }
        }
        "up" => number_box.step_up(),
        "down" => number_box.step_down(),
        "reset" => number_box.reset(),
        "focus" => number_box.focus_gained(),
        "blur" => number_box.focus_lost(),
        "kind" => number_box.set_kind(argument.parse::<NumberKind>()?),
        "value" => number_box.set_value(raw_number(argument)),
        "min" => number_box.set_minimum(raw_number(argument)),
        "max" => number_box.set_maximum(raw_number(argument)),
        "step" => number_box.set_step(raw_number(argument)),
        "default" => number_box.set_default(raw_number(argument)),
        "culture" => number_box.set_parsing_culture(Some(Culture::from_name(argument)?)),
        "check" => number_box.set_checked(argument.trim() == "on"),
        "show" => {
            let selection = number_box.selection();
            println!(
                "text '{}' selection {}+{} value {:?}",
                number_box.text(),
                selection.start,
                selection.length,
                number_box.value()
            );
            return Ok(None);
        }
        _ => {
            eprintln!("Unknown command '{}'", command);
            return Ok(None);
        }
    };
    Ok(Some(verdict))
}

fn print_notification(out: &mut impl Write, notification: &Notification) -> io::Result<()> {
    match notification {
        Notification::Render(text) => writeln!(out, "  render '{}'", text),
        Notification::ValueChanged { old, new, source } => {
            writeln!(out, "  value {:?} -> {:?} ({:?})", old, new, source)
        }
        Notification::CanStepUpChanged(can) => writeln!(out, "  can step up: {}", can),
        Notification::CanStepDownChanged(can) => writeln!(out, "  can step down: {}", can),
        Notification::RequestSelectAll => writeln!(out, "  select all"),
    }
}

fn run() -> Result<(), ConfigError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log.to_level_filter())
        .init();

    let config = match &cli.config {
        Some(path) => NumberBoxConfig::load(path)?,
        None => NumberBoxConfig::default(),
    };
    let mut number_box = NumberBox::new(config);
    log::info!("Number box ready ({})", number_box.kind());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match execute(&mut number_box, line) {
            Ok(Some(verdict)) => writeln!(out, "{} -> {:?}", line, verdict)?,
            Ok(None) => {}
            Err(e) => {
                writeln!(out, "{} -> error: {}", line, e)?;
                continue;
            }
        }
        for notification in number_box.drain_notifications() {
            print_notification(&mut out, &notification)?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("numbox-demo error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["numbox-demo"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.log, LogLevel::Warn);

        let cli = Cli::try_parse_from(["numbox-demo", "--config", "box.json", "--log", "debug"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("box.json")));
        assert_eq!(cli.log, LogLevel::Debug);
    }

    #[test]
    fn test_cli_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["numbox-demo", "--log"]).is_err());
        assert!(Cli::try_parse_from(["numbox-demo", "--log", "loud"]).is_err());
        assert!(Cli::try_parse_from(["numbox-demo", "--cofig", "box.json"]).is_err());
    }

    #[test]
    fn test_execute_commands() {
        let mut number_box = NumberBox::default();
        assert_eq!(
            execute(&mut number_box, "type 12").unwrap(),
            Some(Verdict::Accepted)
        );
        assert_eq!(execute(&mut number_box, "up").unwrap(), Some(Verdict::Accepted));
        assert_eq!(number_box.text(), "13");
        assert_eq!(execute(&mut number_box, "show").unwrap(), None);
        assert!(execute(&mut number_box, "kind money").is_err());
        assert!(execute(&mut number_box, "culture nowhere").is_err());
    }
}
