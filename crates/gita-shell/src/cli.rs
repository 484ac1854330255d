#![forbid(unsafe_code)]

//! Command-line argument parsing for the shell.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `GITA_SHELL_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

use gita_core::ScreenId;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Radha Govind Dham: Gita For Your Life

USAGE:
    gita-shell [OPTIONS]

OPTIONS:
    --screen-mode=MODE   Screen mode: 'alt' (default) or 'inline'
    --ui-height=N        UI height in rows for inline mode (default: 20)
    --screen=NAME        Screen to open after login (default: home)
    --guest              Skip the login form and continue as the guest
    --no-mouse           Disable mouse event capture
    --log-file=PATH      Write logs to PATH (logging is off without it)
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

SCREENS:
    home                 Greeting and feature cards
    scripture            Bhagavad Gita chapters
    assistant            AI Buddy chat
    courses              Structured learning paths
    community            Discussions with fellow seekers
    quizzes              Test your knowledge
    videos               Video library
    personalized-video   AI Video Learning player
    profile              Account, progress and settings

KEYBINDINGS:
    1-5             Home, Courses, Community, Videos, Profile
    Esc             Back / close
    p               Profile menu
    ?               Toggle help overlay
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    GITA_SHELL_SCREEN_MODE     Override --screen-mode (alt|inline)
    GITA_SHELL_UI_HEIGHT       Override --ui-height
    GITA_SHELL_SCREEN          Override --screen
    GITA_SHELL_GUEST           Set to 1 to imply --guest
    GITA_SHELL_LOG_FILE        Override --log-file
    GITA_SHELL_LOG             Log filter directives (default: info)
    GITA_SHELL_EXIT_AFTER_MS   Auto-quit after N milliseconds (for testing)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Screen mode: "alt" or "inline".
    pub screen_mode: String,
    /// UI height for inline mode.
    pub ui_height: u16,
    /// Screen opened once a session starts.
    pub start_screen: Option<ScreenId>,
    /// Start already logged in as the guest.
    pub guest: bool,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Destination for the log, if any.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen_mode: "alt".into(),
            ui_height: 20,
            start_screen: None,
            guest: false,
            mouse: true,
            exit_after_ms: 0,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Exits the process for `--help`,
    /// `--version` and invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("gita-shell {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) on top of `env` lookups.
    pub fn parse_from<F>(args: &[String], env: F) -> Result<Command, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env("GITA_SHELL_SCREEN_MODE") {
            opts.screen_mode = val;
        }
        if let Some(val) = env("GITA_SHELL_UI_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.ui_height = n;
        }
        if let Some(val) = env("GITA_SHELL_SCREEN")
            && let Ok(id) = val.parse()
        {
            opts.start_screen = Some(id);
        }
        if let Some(val) = env("GITA_SHELL_GUEST") {
            opts.guest = matches!(val.trim(), "1" | "true" | "yes");
        }
        if let Some(val) = env("GITA_SHELL_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("GITA_SHELL_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-mouse" => opts.mouse = false,
                "--guest" => opts.guest = true,
                other => {
                    if let Some(val) = other.strip_prefix("--screen-mode=") {
                        opts.screen_mode = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--ui-height=") {
                        opts.ui_height = val
                            .parse()
                            .map_err(|_| format!("Invalid --ui-height value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--screen=") {
                        let id = val
                            .parse::<ScreenId>()
                            .map_err(|e| format!("Invalid --screen value: {e}"))?;
                        opts.start_screen = Some(id);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}
