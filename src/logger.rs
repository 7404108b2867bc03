//! Structured logging with the box-drawing layout used across brightcurve output.
//!
//! Every line goes through [`write_output`], which either prints to stdout or,
//! while a [`LoggerGuard`] is alive, forwards the text to a background writer
//! thread that appends it (ANSI colors stripped) to a log file.
//!
//! Logging can be switched off at runtime. Commands that emit machine-readable
//! output (`--json`) and the unit tests rely on that.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Set once when --log is given; never cleared since the process exits afterwards
static LOG_CHANNEL: OnceLock<Option<Sender<LogMessage>>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Logging facade.
///
/// ## Conventions
///
/// - `log_block_start!` opens a new conceptual block (`┃` spacer then `┣ message`).
/// - `log_decorated!` continues the current block (`┣ message`).
/// - `log_indented!` lists details under the previous line (`┃   message`).
/// - `log_pipe!` inserts a bare `┃`, mostly before a semantic log such as
///   `log_warning!` or `log_error!` that starts its own block.
/// - `log_version!` and `log_end!` frame the whole run.
/// - `log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!`
///   carry a colored `[LEVEL]` tag.
pub struct Log;

impl Log {
    /// Enable or disable logging globally.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Route all subsequent output to `file_path` until the guard drops.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(Some(tx.clone()))
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Timestamp prefix shown while "now" is pinned with `--at`.
    ///
    /// Returns an empty string for the real clock so normal output stays clean.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Keeps the file logger thread alive; flushes and joins it on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Route a fully formatted line to the file logger or stdout.
pub fn write_output(text: &str) {
    if let Some(Some(tx)) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Shared body of the line macros: `$lead` is the text placed before the
/// message on every prefixed line (may contain `{prefix}` placeholders via the
/// closure argument).
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($render:expr, $message:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message: String = $message;
            let render: fn(&str, &str) -> String = $render;
            $crate::logger::write_output(&render(&prefix, &message));
        }
    }};
}

/// Log a message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(|p, m| format!("{p}┣ {m}\n"), format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_line!(|p, m| format!("{p}┣ {m}\n"), format!("{}", $expr))
    };
}

/// Log a detail line nested under the previous message.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(|p, m| format!("{p}┃   {m}\n"), format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_line!(|p, m| format!("{p}┃   {m}\n"), format!("{}", $expr))
    };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_line!(|p, _| format!("{p}┃\n"), String::new())
    };
}

/// Log the first line of a new block.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(|p, m| format!("{p}┃\n{p}┣ {m}\n"), format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::__log_line!(|p, m| format!("{p}┃\n{p}┣ {m}\n"), format!("{}", $expr))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_line!(
            |p, m| format!("{p}┏ brightcurve v{m} ━━╸\n"),
            env!("CARGO_PKG_VERSION").to_string()
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_line!(|p, _| format!("{p}╹\n"), String::new())
    };
}

/// Log a yellow warning.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[33mWARNING\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[33mWARNING\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a red error inside the current block.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a red error that terminates the output flow.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┃\n{p}┗[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┃\n{p}┗[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a green informational message.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[32mINFO\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[32mINFO\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a debug/operational message.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[32mDEBUG\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[32mDEBUG\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a red critical message.
#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[31mCRITICAL\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            |p, m| format!("{p}┣[\x1b[31mCRITICAL\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}
