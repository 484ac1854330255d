#![forbid(unsafe_code)]

//! Radha Govind Dham shell binary entry point.

use ftui_runtime::{Program, ProgramConfig, ScreenMode};
use gita_shell::app::AppModel;
use gita_shell::{cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let screen_mode = match opts.screen_mode.as_str() {
        "inline" => ScreenMode::Inline {
            ui_height: opts.ui_height,
        },
        _ => ScreenMode::AltScreen,
    };

    let mut model = AppModel::new();
    model.start_screen = opts.start_screen;
    model.exit_after_ms = opts.exit_after_ms;
    if opts.guest {
        model = model.with_guest();
    }

    let config = ProgramConfig {
        screen_mode,
        mouse: opts.mouse,
        ..ProgramConfig::default()
    };
    match Program::with_config(model, config) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
