//! Console channel: reads lines from stdin, runs turns through the
//! [`SessionController`], prints replies, errors and notices to stdout.
//!
//! Lines starting with `/` are settings and view commands; everything else is
//! one user submission. Runs until `/quit`, stdin EOF, or the `shutdown`
//! token is cancelled (Ctrl-C).

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chat::{Presenter, Role, SessionController};
use crate::error::AppError;

pub const APP_TITLE: &str = "⚕️ MED-INTEL — Your AI Healthcare Assistant";
pub const STARTUP_DISCLAIMER: &str = "**Disclaimer:** I am not a doctor—this is not medical advice. \
    For emergencies, call your local emergency number immediately.";

const HELP: &str = "\
Commands:
  /help                 Show this help
  /history              Show the conversation so far
  /settings             Show the current generation settings
  /sources on|off       Add short source suggestions to answers
  /temp <0.0-1.0>       Set creativity (temperature)
  /max-tokens <256-1200> Set max response tokens
  /quit                 Leave the console";

/// A parsed `/command` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    History,
    Settings,
    Sources(bool),
    Temperature(f32),
    MaxTokens(u32),
    Quit,
}

/// Parse a line starting with `/`. The error text is shown to the user as-is.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim().trim_start_matches('/').split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("help" | "h" | "?", _) => Ok(Command::Help),
        ("history", _) => Ok(Command::History),
        ("settings", _) => Ok(Command::Settings),
        ("sources", Some("on")) => Ok(Command::Sources(true)),
        ("sources", Some("off")) => Ok(Command::Sources(false)),
        ("sources", _) => Err("usage: /sources on|off".into()),
        ("temp", Some(v)) => v
            .parse()
            .map(Command::Temperature)
            .map_err(|_| format!("not a number: {v}")),
        ("temp", None) => Err("usage: /temp <0.0-1.0>".into()),
        ("max-tokens", Some(v)) => v
            .parse()
            .map(Command::MaxTokens)
            .map_err(|_| format!("not a whole number: {v}")),
        ("max-tokens", None) => Err("usage: /max-tokens <256-1200>".into()),
        ("quit" | "exit" | "q", _) => Ok(Command::Quit),
        (other, _) => Err(format!("unknown command: /{other} (try /help)")),
    }
}

/// What one console line asks for.
#[derive(Debug, PartialEq)]
pub enum ConsoleInput<'a> {
    Blank,
    Command(Result<Command, String>),
    /// The line exactly as typed; it becomes the user message.
    Submission(&'a str),
}

pub fn classify_line(line: &str) -> ConsoleInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ConsoleInput::Blank
    } else if trimmed.starts_with('/') {
        ConsoleInput::Command(parse_command(trimmed))
    } else {
        ConsoleInput::Submission(line)
    }
}

/// Writes turn events to stdout.
struct StdoutPresenter;

impl Presenter for StdoutPresenter {
    fn emergency_notice(&mut self, notice: &str) {
        println!("{notice}");
    }

    fn thinking(&mut self) {
        println!("Thinking…");
    }

    fn assistant_reply(&mut self, text: &str) {
        println!("\nassistant:\n{text}");
    }

    fn turn_error(&mut self, text: &str) {
        println!("\n{text}");
    }
}

/// Apply a command. Returns `false` when the console should exit.
fn apply_command(cmd: Command, controller: &mut SessionController) -> bool {
    match cmd {
        Command::Help => println!("{HELP}"),
        Command::History => print_history(controller),
        Command::Settings => print_settings(controller),
        Command::Sources(on) => {
            controller.generation_mut().set_include_source_suggestions(on);
            println!("source suggestions {}", if on { "on" } else { "off" });
        }
        Command::Temperature(t) => match controller.generation_mut().set_temperature(t) {
            Ok(()) => println!("temperature = {t}"),
            Err(e) => println!("{e}"),
        },
        Command::MaxTokens(n) => match controller.generation_mut().set_max_output_tokens(n) {
            Ok(()) => println!("max tokens = {n}"),
            Err(e) => println!("{e}"),
        },
        Command::Quit => return false,
    }
    true
}

fn print_history(controller: &SessionController) {
    let transcript = controller.session().transcript();
    if transcript.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for m in transcript {
        let who = match m.role() {
            Role::Assistant => "assistant",
            _ => "you",
        };
        println!("\n{who}:\n{}", m.content());
    }
}

fn print_settings(controller: &SessionController) {
    let g = controller.generation();
    println!("provider:           {}", controller.provider().describe());
    println!("temperature:        {}", g.temperature());
    println!("max tokens:         {}", g.max_output_tokens());
    println!("source suggestions: {}", if g.include_source_suggestions() { "on" } else { "off" });
}

pub async fn run_console(
    mut controller: SessionController,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    info!("console started");
    println!("{APP_TITLE}");
    println!("{STARTUP_DISCLAIMER}");
    println!("Ask anything about your health. /help for commands, Ctrl-C to quit.");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut presenter = StdoutPresenter;

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                println!();
                info!("console shutting down");
                break;
            }

            line = lines.next_line() => {
                let input = match line {
                    Err(e) => {
                        warn!("console read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Ok(Some(input)) => input,
                };

                match classify_line(&input) {
                    ConsoleInput::Blank => {}
                    ConsoleInput::Command(Ok(cmd)) => {
                        debug!(?cmd, "console command");
                        if !apply_command(cmd, &mut controller) {
                            break;
                        }
                    }
                    ConsoleInput::Command(Err(msg)) => println!("{msg}"),
                    ConsoleInput::Submission(text) => {
                        // The turn runs to completion; no further input is read meanwhile.
                        controller.submit(text, &mut presenter).await;
                    }
                }
            }
        }
    }

    info!(messages = controller.session().len(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings_commands() {
        assert_eq!(parse_command("/sources off"), Ok(Command::Sources(false)));
        assert_eq!(parse_command("/sources on"), Ok(Command::Sources(true)));
        assert_eq!(parse_command("/temp 0.45"), Ok(Command::Temperature(0.45)));
        assert_eq!(parse_command("/max-tokens 900"), Ok(Command::MaxTokens(900)));
        assert_eq!(parse_command("  /history "), Ok(Command::History));
        assert_eq!(parse_command("/quit"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("/sources maybe").is_err());
        assert!(parse_command("/temp hot").is_err());
        assert!(parse_command("/max-tokens -5").is_err());
        assert!(parse_command("/max-tokens").is_err());
    }

    #[test]
    fn submissions_keep_the_raw_line() {
        assert_eq!(classify_line("  my chest hurts  "), ConsoleInput::Submission("  my chest hurts  "));
        assert_eq!(classify_line(" \t "), ConsoleInput::Blank);
        assert_eq!(classify_line("  /sources off"), ConsoleInput::Command(Ok(Command::Sources(false))));
    }

    #[test]
    fn unknown_command_hints_help() {
        let err = parse_command("/diagnose").unwrap_err();
        assert!(err.contains("/diagnose"));
        assert!(err.contains("/help"));
    }

    #[test]
    fn out_of_range_setting_keeps_previous_value() {
        use crate::chat::GenerationConfig;
        use crate::llm::{providers::dummy::DummyProvider, LlmProvider};

        let mut c = SessionController::new("sys", LlmProvider::Dummy(DummyProvider), GenerationConfig::default());
        assert!(apply_command(Command::Temperature(2.0), &mut c));
        assert_eq!(c.generation().temperature(), 0.3);
        assert!(apply_command(Command::MaxTokens(1024), &mut c));
        assert_eq!(c.generation().max_output_tokens(), 1024);
        assert!(!apply_command(Command::Quit, &mut c));
    }
}
