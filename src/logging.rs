use std::fs::OpenOptions;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::config::LoggingConfig;
use crate::model::Command;

/// Install the global logger: stderr always, plus the configured log file.
/// Best-effort: an unopenable file or an already-installed logger is ignored
/// (logging must never block rendering).
pub fn init(config: &LoggingConfig) {
    let level = config.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if !config.file.is_empty() {
        let path = shellexpand::tilde(&config.file);
        if let Some(dir) = std::path::Path::new(&*path).parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&*path) {
            let file_config = ConfigBuilder::new().set_time_format_rfc3339().build();
            loggers.push(WriteLogger::new(level, file_config, file));
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Record one rendered chain at info level.
pub fn log_render(cmd: &Command, rendered: &str) {
    // Quoted arguments may carry newlines; keep the record on one line.
    let shown: String = rendered.replace('\n', "\\n").chars().take(200).collect();
    log::info!("{} ({} command(s)) -> {shown}", cmd.name, cmd.len());
}
