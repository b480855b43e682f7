//! Line-oriented interactive driver over a [`Session`].
//!
//! New trace lines are echoed as they appear, the terminal counterpart of the
//! log panel scrolling when its length grows.

use std::io::{self, BufRead, Write};

use simulator_core::Session;
use tracing::debug;

use crate::render::{render_result, render_state};

/// Help text listing interactive commands.
pub const REPL_HELP: &str = "\
Commands:
  key <text>  Set the search key (hex with 0x, or decimal) and reset
  init        Initialize the simulation with the current key
  step        Execute the next loop iteration
  reset       Discard the run and restore the default key
  show        Print array, registers and result
  help        Show this help message
  quit        Leave the simulator";

/// One parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Replace the key text.
    Key(String),
    /// Start a run.
    Init,
    /// Advance one step.
    Step,
    /// Return to the ready state.
    Reset,
    /// Print the current state.
    Show,
    /// Print command help.
    Help,
    /// Exit the loop.
    Quit,
}

/// Parses one input line; blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a message for unknown commands or a `key` without text.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "key" if rest.is_empty() => return Err("missing key text".to_string()),
        "key" => ReplCommand::Key(rest.to_string()),
        "init" | "initialize" => ReplCommand::Init,
        "step" | "next" | "s" => ReplCommand::Step,
        "reset" => ReplCommand::Reset,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

/// Tracks which log lines have already been written to the terminal.
#[derive(Debug, Default)]
pub struct LogFollower {
    shown: Vec<String>,
}

impl LogFollower {
    /// Writes log lines not yet shown.
    ///
    /// A log that no longer starts with the lines already shown belongs to a
    /// new run and is written in full.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn follow(&mut self, log: &[String], out: &mut impl Write) -> io::Result<()> {
        if !log.starts_with(&self.shown) {
            self.shown.clear();
        }
        for line in &log[self.shown.len()..] {
            writeln!(out, "{line}")?;
        }
        self.shown = log.to_vec();
        Ok(())
    }
}

/// Runs the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Propagates read and write failures.
pub fn run_interactive(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut follower = LogFollower::default();
    follower.follow(session.state().log(), out)?;

    for line in input.lines() {
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                writeln!(out, "error: {error}")?;
                continue;
            }
        };
        debug!(?command, "interactive command");
        let stepped = command == ReplCommand::Step;

        match command {
            ReplCommand::Key(text) => {
                session.set_key_input(&text);
                writeln!(out, "key set to {text}")?;
            }
            ReplCommand::Init => {
                if !session.can_initialize() {
                    writeln!(out, "a run is in progress; step it to the end or reset")?;
                }
                session.initialize();
            }
            ReplCommand::Step => {
                if session.state().is_finished() {
                    writeln!(out, "search already finished; init to run again or reset")?;
                } else if !session.can_step() {
                    writeln!(out, "nothing to step; initialize first")?;
                }
                session.step();
            }
            ReplCommand::Reset => {
                session.reset();
            }
            ReplCommand::Show => {
                writeln!(out, "{}", render_state(&session.view()))?;
                continue;
            }
            ReplCommand::Help => {
                writeln!(out, "{REPL_HELP}")?;
                continue;
            }
            ReplCommand::Quit => break,
        }

        follower.follow(session.state().log(), out)?;
        if stepped {
            if let Some(result) = render_result(&session.view()) {
                writeln!(out, "{result}")?;
            }
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use simulator_core::Session;

    use super::{parse_command, run_interactive, LogFollower, ReplCommand};

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(parse_command("INIT"), Ok(Some(ReplCommand::Init)));
        assert_eq!(parse_command("  step "), Ok(Some(ReplCommand::Step)));
        assert_eq!(parse_command("q"), Ok(Some(ReplCommand::Quit)));
        assert_eq!(
            parse_command("key   0x20 "),
            Ok(Some(ReplCommand::Key("0x20".to_string())))
        );
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn rejects_unknown_commands_and_bare_key() {
        let error = parse_command("jump").expect_err("unknown command should fail");
        assert!(error.contains("unknown command"));

        let error = parse_command("key").expect_err("key without text should fail");
        assert!(error.contains("missing key"));
    }

    #[test]
    fn follower_prints_only_new_lines_and_replays_after_reset() {
        let mut follower = LogFollower::default();
        let mut out = Vec::new();

        let first = vec!["a".to_string(), "b".to_string()];
        follower.follow(&first, &mut out).expect("write to vec");
        let grown = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        follower.follow(&grown, &mut out).expect("write to vec");
        let replaced = vec!["x".to_string(), "y".to_string(), "z".to_string(), "w".to_string()];
        follower.follow(&replaced, &mut out).expect("write to vec");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "a\nb\nc\nx\ny\nz\nw\n"
        );
    }

    #[test]
    fn interactive_session_reaches_result() {
        let mut session = Session::default();
        let input = Cursor::new("step\ninit\nstep\nstep\nstep\nstep\nquit\nstep\n");
        let mut out = Vec::new();

        run_interactive(&mut session, input, &mut out).expect("in-memory io");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("--- Simulation Initialized ---"));
        assert!(text.contains("JZ FOUND"));
        assert!(text.contains("Result: Key Found at Index 5"));
        assert!(text.contains("nothing to step; initialize first"));
        assert!(text.contains("search already finished"));
        assert_eq!(session.state().found_index(), Some(5));
    }

    #[test]
    fn key_command_resets_with_new_text() {
        let mut session = Session::default();
        let input = Cursor::new("key 0x99\ninit\n");
        let mut out = Vec::new();

        run_interactive(&mut session, input, &mut out).expect("in-memory io");

        assert_eq!(session.state().key_to_search(), 0x99);
        assert!(session.state().is_initialized());
    }
}
