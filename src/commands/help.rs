//! Help output for brightcurve and its commands.

/// Run the help display for `command`, or the general help when `None`.
pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("show") => super::show::display_help(),
        Some("get" | "g") => super::get::display_help(),
        Some("render" | "r") => super::render::display_help(),
        Some("add" | "a" | "move" | "m" | "delete" | "del") => super::edit::display_help(),
        Some("preview" | "p") => super::preview::display_help(),
        Some("watch" | "w") => super::watch::display_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
}

/// Display general usage with every command and global option.
pub fn display_general_help() {
    log_version!();
    log_block_start!("Usage: brightcurve [OPTIONS] [COMMAND]");
    log_block_start!("Commands:");
    log_indented!("show                      Resolved schedule and midnight value (default)");
    log_indented!("get, g [TIME]             Brightness at a time, or now");
    log_indented!("render, r                 Brightness sampled across the day");
    log_indented!("add, a TIME BRIGHTNESS    Add a schedule entry");
    log_indented!("move, m INDEX TIME BRIGHT Move an entry");
    log_indented!("delete, del INDEX         Delete an entry");
    log_indented!("preview, p                Play the day back in five seconds");
    log_indented!("watch, w                  Follow the current brightness");
    log_block_start!("Options:");
    log_indented!("-c, --config DIR          Use DIR/brightcurve.toml");
    log_indented!("    --at \"DATE TIME\"      Pin now to YYYY-MM-DD HH:MM:SS");
    log_indented!("-l, --log FILE            Write output to FILE");
    log_indented!("-d, --debug               Enable debug output");
    log_indented!("-j, --json                JSON output for show and render");
    log_indented!("-s, --step N              Render step in minutes");
    log_indented!("-h, --help                Print help");
    log_indented!("-V, --version             Print version");
    log_pipe!();
    log_info!("Use 'brightcurve <command> --help' for details on a command.");
    log_end!();
}
