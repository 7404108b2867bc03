//! Command-line argument parsing.
//!
//! Arguments are split into global flags, which may appear anywhere, and a
//! subcommand with its positional operands. Running without a subcommand
//! shows the schedule.

/// What the command line asks brightcurve to do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print resolved points and the midnight boundary value
    Show { json: bool },
    /// Print the brightness at a clock time, or now when omitted
    Get { time: Option<String> },
    /// Print the curve sampled every `step` minutes
    Render { step: Option<u32>, json: bool },
    /// Append an entry
    Add { time: String, brightness: f64 },
    /// Move an entry to a new time and brightness
    Move {
        index: usize,
        time: String,
        brightness: f64,
    },
    /// Remove an entry
    Delete { index: usize },
    /// Play the day back in five seconds
    Preview,
    /// Follow the current brightness on the wall clock
    Watch,

    /// Display help, for one command when named
    ShowHelp { command: Option<String> },
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
#[derive(Debug, PartialEq)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    /// Pinned "now" as `YYYY-MM-DD HH:MM:SS`
    pub at: Option<String>,
    pub log_file: Option<String>,
}

/// Negative numbers are operands, not flags.
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-')
        && !arg
            .chars()
            .nth(1)
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

fn usage_error(message: &str, usage: &str) -> CliAction {
    log_warning!("{}. Usage: brightcurve {}", message, usage);
    CliAction::ShowHelpDueToError
}

impl ParsedArgs {
    /// Parse command-line arguments, including the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut parsed = ParsedArgs {
            action: CliAction::Show { json: false },
            debug_enabled: false,
            config_dir: None,
            at: None,
            log_file: None,
        };

        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut step: Option<String> = None;
        let mut error: Option<CliAction> = None;
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            if !is_flag(arg) {
                positionals.push(arg.to_string());
                i += 1;
                continue;
            }

            // Flags taking a value consume the next argument
            let mut take_value = |name: &str| -> Option<String> {
                match args_vec.get(i + 1) {
                    Some(value) if !is_flag(value) => {
                        i += 1;
                        Some(value.clone())
                    }
                    _ => {
                        log_warning!("Missing value for {}", name);
                        None
                    }
                }
            };

            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => parsed.debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => match take_value("--config <directory>") {
                    Some(dir) => parsed.config_dir = Some(dir),
                    None => error = Some(CliAction::ShowHelpDueToError),
                },
                "--at" => match take_value("--at \"YYYY-MM-DD HH:MM:SS\"") {
                    Some(at) => parsed.at = Some(at),
                    None => error = Some(CliAction::ShowHelpDueToError),
                },
                "--log" | "-l" => match take_value("--log <file>") {
                    Some(file) => parsed.log_file = Some(file),
                    None => error = Some(CliAction::ShowHelpDueToError),
                },
                "--step" | "-s" => match take_value("--step <minutes>") {
                    Some(value) => step = Some(value),
                    None => error = Some(CliAction::ShowHelpDueToError),
                },
                _ => {
                    log_warning!("Unknown option: {}", arg);
                    error = Some(CliAction::ShowHelpDueToError);
                }
            }
            i += 1;
        }

        // Help and version take precedence over everything else
        if display_version {
            parsed.action = CliAction::ShowVersion;
            return parsed;
        }
        if display_help {
            parsed.action = CliAction::ShowHelp {
                command: positionals.first().cloned(),
            };
            return parsed;
        }
        if let Some(action) = error {
            parsed.action = action;
            return parsed;
        }

        parsed.action = Self::parse_command(&positionals, json, step);
        parsed
    }

    fn parse_command(positionals: &[String], json: bool, step: Option<String>) -> CliAction {
        let Some((command, operands)) = positionals.split_first() else {
            return if step.is_some() {
                usage_error("--step only applies to render", "render --step <minutes>")
            } else {
                CliAction::Show { json }
            };
        };

        if step.is_some() && !matches!(command.as_str(), "render" | "r") {
            return usage_error("--step only applies to render", "render --step <minutes>");
        }
        if json && !matches!(command.as_str(), "show" | "render" | "r") {
            return usage_error("--json only applies to show and render", "show --json");
        }

        match (command.as_str(), operands) {
            ("show", []) => CliAction::Show { json },
            ("get" | "g", []) => CliAction::Get { time: None },
            ("get" | "g", [time]) => CliAction::Get {
                time: Some(time.clone()),
            },
            ("render" | "r", []) => match step.as_deref().map(str::parse::<u32>) {
                None => CliAction::Render { step: None, json },
                Some(Ok(step)) => CliAction::Render {
                    step: Some(step),
                    json,
                },
                Some(Err(_)) => usage_error("Invalid step", "render --step <minutes>"),
            },
            ("add" | "a", [time, brightness]) => match brightness.parse::<f64>() {
                Ok(brightness) if brightness.is_finite() => CliAction::Add {
                    time: time.clone(),
                    brightness,
                },
                _ => usage_error("Invalid brightness", "add <time> <brightness>"),
            },
            ("move" | "m", [index, time, brightness]) => {
                match (index.parse::<usize>(), brightness.parse::<f64>()) {
                    (Ok(index), Ok(brightness)) if brightness.is_finite() => CliAction::Move {
                        index,
                        time: time.clone(),
                        brightness,
                    },
                    _ => usage_error(
                        "Invalid index or brightness",
                        "move <index> <time> <brightness>",
                    ),
                }
            }
            ("delete" | "del", [index]) => match index.parse::<usize>() {
                Ok(index) => CliAction::Delete { index },
                Err(_) => usage_error("Invalid index", "delete <index>"),
            },
            ("preview" | "p", []) => CliAction::Preview,
            ("watch" | "w", []) => CliAction::Watch,
            ("get" | "g", _) => usage_error("Too many arguments", "get [time]"),
            ("add" | "a", _) => usage_error("Wrong number of arguments", "add <time> <brightness>"),
            ("move" | "m", _) => usage_error(
                "Wrong number of arguments",
                "move <index> <time> <brightness>",
            ),
            ("delete" | "del", _) => usage_error("Wrong number of arguments", "delete <index>"),
            ("show" | "render" | "r" | "preview" | "p" | "watch" | "w", _) => {
                log_warning!("'{}' takes no arguments", command);
                CliAction::ShowHelpDueToError
            }
            _ => {
                log_warning!("Unknown command: {}", command);
                CliAction::ShowHelpDueToError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Log;

    fn parse(args: &[&str]) -> ParsedArgs {
        Log::set_enabled(false);
        let mut full = vec!["brightcurve"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full)
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = parse(&[]);
        assert_eq!(parsed.action, CliAction::Show { json: false });
        assert!(!parsed.debug_enabled);
        assert_eq!(parsed.config_dir, None);
    }

    #[test]
    fn test_parse_global_flags_anywhere() {
        let parsed = parse(&[
            "--debug",
            "get",
            "7:30pm",
            "--config",
            "/tmp/bc",
            "--at",
            "2024-06-21 12:00:00",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Get {
                time: Some("7:30pm".to_string())
            }
        );
        assert!(parsed.debug_enabled);
        assert_eq!(parsed.config_dir.as_deref(), Some("/tmp/bc"));
        assert_eq!(parsed.at.as_deref(), Some("2024-06-21 12:00:00"));
    }

    #[test]
    fn test_parse_help_and_version_take_precedence() {
        assert_eq!(
            parse(&["add", "--help"]).action,
            CliAction::ShowHelp {
                command: Some("add".to_string())
            }
        );
        assert_eq!(
            parse(&["-h"]).action,
            CliAction::ShowHelp { command: None }
        );
        assert_eq!(parse(&["-V", "--help"]).action, CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_edit_commands() {
        assert_eq!(
            parse(&["add", "06:00", "35"]).action,
            CliAction::Add {
                time: "06:00".to_string(),
                brightness: 35.0
            }
        );
        assert_eq!(
            parse(&["move", "2", "9:15am", "-5"]).action,
            CliAction::Move {
                index: 2,
                time: "9:15am".to_string(),
                brightness: -5.0
            }
        );
        assert_eq!(
            parse(&["delete", "0"]).action,
            CliAction::Delete { index: 0 }
        );
    }

    #[test]
    fn test_parse_render_options() {
        assert_eq!(
            parse(&["render", "--step", "30", "--json"]).action,
            CliAction::Render {
                step: Some(30),
                json: true
            }
        );
        assert_eq!(
            parse(&["render", "--step", "abc"]).action,
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["show", "--step", "30"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_invalid_arguments() {
        assert_eq!(parse(&["frobnicate"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--frobnicate"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["add", "06:00"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(
            parse(&["add", "06:00", "bright"]).action,
            CliAction::ShowHelpDueToError
        );
        assert_eq!(parse(&["delete", "x"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["watch", "now"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--config"]).action, CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["get", "--json"]).action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_playback_commands() {
        assert_eq!(parse(&["preview"]).action, CliAction::Preview);
        let parsed = parse(&["watch", "--log", "/tmp/bc.log"]);
        assert_eq!(parsed.action, CliAction::Watch);
        assert_eq!(parsed.log_file.as_deref(), Some("/tmp/bc.log"));
    }
}
