//! Main application entry point.
//!
//! Parses the command line, installs the process-wide settings (config
//! directory, time source, file logging) and dispatches to a command handler
//! from the library. Errors from handlers are reported here and turned into
//! the process exit code.

use anyhow::{Context, Result};
use std::sync::Arc;

use brightcurve::args::{CliAction, ParsedArgs};
use brightcurve::commands;
use brightcurve::commands::edit::Edit;
use brightcurve::config;
use brightcurve::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use brightcurve::logger::Log;
use brightcurve::time_source::{self, FixedTimeSource, RealTimeSource};
use brightcurve::{log_block_start, log_end, log_error, log_indented, log_pipe, log_version};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let code = match run(parsed) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            Log::set_enabled(true);
            log_pipe!();
            log_error!("{}", e);
            for cause in e.chain().skip(1) {
                log_indented!("Caused by: {}", cause);
            }
            log_end!();
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(parsed: ParsedArgs) -> Result<()> {
    let ParsedArgs {
        action,
        debug_enabled,
        config_dir,
        at,
        log_file,
    } = parsed;

    match action {
        CliAction::ShowVersion => {
            log_version!();
            log_end!();
            return Ok(());
        }
        CliAction::ShowHelp { command } => {
            commands::help::run_help_command(command.as_deref());
            return Ok(());
        }
        CliAction::ShowHelpDueToError => {
            commands::help::display_general_help();
            std::process::exit(EXIT_FAILURE);
        }
        _ => {}
    }

    config::set_config_dir(config_dir)?;

    match at {
        Some(text) => {
            let instant = time_source::parse_datetime(&text)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid --at value '{text}'"))?;
            time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
        }
        None => time_source::init_time_source(Arc::new(RealTimeSource)),
    }

    let _log_guard = match log_file {
        Some(path) => Some(
            Log::start_file_logging(path.clone())
                .with_context(|| format!("Failed to start logging to {path}"))?,
        ),
        None => None,
    };

    let json = matches!(
        action,
        CliAction::Show { json: true } | CliAction::Render { json: true, .. }
    );
    if json {
        Log::set_enabled(false);
    } else {
        log_version!();
        if debug_enabled {
            log_block_start!("Debug mode enabled");
        }
    }

    match action {
        CliAction::Show { json } => commands::show::handle_show_command(debug_enabled, json),
        CliAction::Get { time } => commands::get::handle_get_command(time.as_deref(), debug_enabled),
        CliAction::Render { step, json } => {
            commands::render::handle_render_command(step, debug_enabled, json)
        }
        CliAction::Add { time, brightness } => {
            commands::edit::handle_edit_command(Edit::Add { time, brightness }, debug_enabled)
        }
        CliAction::Move {
            index,
            time,
            brightness,
        } => commands::edit::handle_edit_command(
            Edit::Move {
                index,
                time,
                brightness,
            },
            debug_enabled,
        ),
        CliAction::Delete { index } => {
            commands::edit::handle_edit_command(Edit::Delete { index }, debug_enabled)
        }
        CliAction::Preview => commands::preview::handle_preview_command(debug_enabled),
        CliAction::Watch => commands::watch::handle_watch_command(debug_enabled),
        CliAction::ShowHelp { .. } | CliAction::ShowVersion | CliAction::ShowHelpDueToError => {
            unreachable!("handled before setup")
        }
    }
}
