//! CLI entry point for the binary search simulator.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde_json as _;
use simulator_cli::init_logging;
use simulator_cli::render::{render_json, render_state};
use simulator_cli::repl::run_interactive;
use simulator_core::{Session, SimulatorConfig};
#[cfg(test)]
use tempfile as _;
use tracing::info;
use tracing_subscriber as _;

const USAGE_TEXT: &str = "\
Usage: bsearch-sim <command> [options]

Commands:
  run [<key>]   Initialize with <key> and step until the search finishes
  interactive   Drive the simulator one command at a time from stdin

Options:
  -a, --array <list>   Comma-separated sorted bytes (default: 0x10,0x20,...,0xA4)
  -b, --base <addr>    Base address of the array (default: 0x3000)
  -o, --output <file>  Write the trace log to a file (run only)
      --json           Print one JSON snapshot per transition (run only)
  -h, --help           Show this help message

Examples:
  bsearch-sim run 0x66
  bsearch-sim run 0x42 --array 0x01,0x42,0x80 --base 0x8000
  RUST_LOG=debug bsearch-sim interactive
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(RunArgs),
    Interactive(MachineArgs),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct MachineArgs {
    array: Option<Vec<u8>>,
    base_address: Option<u16>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunArgs {
    key: Option<String>,
    machine: MachineArgs,
    output: Option<PathBuf>,
    json: bool,
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "run" => parse_run_args(args)
            .map(Command::Run)
            .map(ParseResult::Command),
        "interactive" => parse_interactive_args(args)
            .map(Command::Interactive)
            .map(ParseResult::Command),
        other => Err(format!("unknown command: {other}")),
    }
}

/// Consumes `arg` if it is a machine option, returning whether it matched.
fn parse_machine_option(
    arg: &OsString,
    args: &mut impl Iterator<Item = OsString>,
    machine: &mut MachineArgs,
) -> Result<bool, String> {
    if arg == "-a" || arg == "--array" {
        let value = args
            .next()
            .ok_or_else(|| "missing value for --array".to_string())?;
        machine.array = Some(parse_array(&value.to_string_lossy())?);
        return Ok(true);
    }

    if arg == "-b" || arg == "--base" {
        let value = args
            .next()
            .ok_or_else(|| "missing value for --base".to_string())?;
        machine.base_address = Some(parse_address(&value.to_string_lossy())?);
        return Ok(true);
    }

    Ok(false)
}

#[allow(clippy::while_let_on_iterator)]
fn parse_run_args(mut args: impl Iterator<Item = OsString>) -> Result<RunArgs, String> {
    let mut run = RunArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if parse_machine_option(&arg, &mut args, &mut run.machine)? {
            continue;
        }

        if arg == "--json" {
            run.json = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            run.output = Some(PathBuf::from(value));
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if run.key.is_some() {
            return Err("multiple keys provided".to_string());
        }
        run.key = Some(arg.to_string_lossy().to_string());
    }

    Ok(run)
}

#[allow(clippy::while_let_on_iterator)]
fn parse_interactive_args(mut args: impl Iterator<Item = OsString>) -> Result<MachineArgs, String> {
    let mut machine = MachineArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if parse_machine_option(&arg, &mut args, &mut machine)? {
            continue;
        }

        return Err(format!("unknown option: {}", arg.to_string_lossy()));
    }

    Ok(machine)
}

fn parse_number(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|_| format!("invalid number: {text}"))
}

fn parse_array(list: &str) -> Result<Vec<u8>, String> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(',')
        .map(|item| {
            let value = parse_number(item)?;
            u8::try_from(value).map_err(|_| format!("array value out of range: {}", item.trim()))
        })
        .collect()
}

fn parse_address(text: &str) -> Result<u16, String> {
    let value = parse_number(text)?;
    u16::try_from(value).map_err(|_| format!("base address out of range: {}", text.trim()))
}

fn build_session(machine: MachineArgs) -> Result<Session, i32> {
    let mut config = SimulatorConfig::default();
    if let Some(array) = machine.array {
        config.array = array;
    }
    if let Some(base_address) = machine.base_address {
        config.base_address = base_address;
    }

    Session::new(config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn report_io_error(e: &io::Error) -> i32 {
    eprintln!("error: failed to write output: {e}");
    1
}

fn emit_snapshot(session: &Session, out: &mut impl Write) -> Result<(), i32> {
    let json = render_json(session.state()).map_err(|e| {
        eprintln!("error: failed to serialize snapshot: {e}");
        1
    })?;
    writeln!(out, "{json}").map_err(|e| report_io_error(&e))
}

fn run_search(args: RunArgs) -> Result<(), i32> {
    let mut session = build_session(args.machine)?;
    if let Some(key) = &args.key {
        session.set_key_input(key);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    session.initialize();
    if args.json {
        emit_snapshot(&session, &mut out)?;
    } else {
        write_lines(&mut out, session.state().log()).map_err(|e| report_io_error(&e))?;
    }

    while session.can_step() {
        let shown = session.state().log().len();
        session.step();
        if args.json {
            emit_snapshot(&session, &mut out)?;
        } else {
            write_lines(&mut out, &session.state().log()[shown..])
                .map_err(|e| report_io_error(&e))?;
        }
    }

    if !args.json {
        writeln!(out, "\n{}", render_state(&session.view())).map_err(|e| report_io_error(&e))?;
    }

    if let Some(path) = args.output {
        let mut text = session.state().log().join("\n");
        text.push('\n');
        fs::write(&path, text).map_err(|e| report_io_error(&e))?;
        info!(
            path = %path.display(),
            lines = session.state().log().len(),
            "trace written"
        );
    }

    Ok(())
}

fn run_repl(machine: MachineArgs) -> Result<(), i32> {
    let mut session = build_session(machine)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_interactive(&mut session, stdin.lock(), &mut out).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn main() {
    init_logging();

    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Run(args))) => match run_search(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Interactive(args))) => match run_repl(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn os_args(args: &[&str]) -> impl Iterator<Item = OsString> {
        args.iter()
            .map(OsString::from)
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_run_command() {
        let result = parse_run_args(os_args(&[
            "0x42",
            "--array",
            "0x01, 0x42,200",
            "-b",
            "0x8000",
            "-o",
            "trace.txt",
            "--json",
        ]))
        .expect("valid run args should parse");

        assert_eq!(
            result,
            RunArgs {
                key: Some("0x42".to_string()),
                machine: MachineArgs {
                    array: Some(vec![0x01, 0x42, 200]),
                    base_address: Some(0x8000),
                },
                output: Some(PathBuf::from("trace.txt")),
                json: true,
            }
        );
    }

    #[test]
    fn run_without_key_uses_defaults() {
        let result = parse_run_args(std::iter::empty()).expect("bare run should parse");
        assert_eq!(result, RunArgs::default());
    }

    #[test]
    fn parses_interactive_command() {
        let result = parse_args(os_args(&["interactive", "-a", "1,2,3"]))
            .expect("interactive should parse");

        let ParseResult::Command(Command::Interactive(machine)) = result else {
            panic!("expected interactive command");
        };
        assert_eq!(machine.array, Some(vec![1, 2, 3]));
        assert_eq!(machine.base_address, None);
    }

    #[test]
    fn parses_help_flag() {
        let result = parse_args(os_args(&["--help"])).expect("help should parse without error");
        assert!(matches!(result, ParseResult::Help));
    }

    #[test]
    fn rejects_unknown_command() {
        let error = parse_args(os_args(&["unknown"])).expect_err("unknown command should fail");
        assert!(error.contains("unknown command"));
    }

    #[test]
    fn rejects_second_key() {
        let error = parse_run_args(os_args(&["0x10", "0x20"])).expect_err("two keys should fail");
        assert!(error.contains("multiple keys"));
    }

    #[test]
    fn interactive_rejects_run_options() {
        let error = parse_interactive_args(os_args(&["--json"]))
            .expect_err("interactive should reject --json");
        assert!(error.contains("unknown option"));
    }

    #[test]
    fn array_values_must_fit_a_byte() {
        let error = parse_array("0x10,0x100").expect_err("0x100 is not a byte");
        assert!(error.contains("out of range"));

        let error = parse_array("0x10,,0x20").expect_err("empty item is not a number");
        assert!(error.contains("invalid number"));
    }

    #[test]
    fn empty_array_list_is_allowed() {
        assert_eq!(parse_array(""), Ok(Vec::new()));
    }

    #[test]
    fn base_address_must_fit_sixteen_bits() {
        assert_eq!(parse_address("0XFFFF"), Ok(0xFFFF));
        assert_eq!(parse_address("4096"), Ok(0x1000));
        let error = parse_address("0x10000").expect_err("too large");
        assert!(error.contains("out of range"));
    }

    #[test]
    fn missing_option_value_is_reported() {
        let error = parse_run_args(os_args(&["--base"])).expect_err("missing value");
        assert!(error.contains("missing value for --base"));
    }
}
