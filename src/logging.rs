use colored::Colorize;
use fern::colors::{Color, ColoredLevelConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Installs the global logger. Serenity and reqwest internals are kept at
/// warn so command traffic stays readable.
pub fn init(level: LogLevel) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Magenta)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %I:%M:%S %p"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("kozybeat", level.to_filter())
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}

pub fn print_banner(text: &str) {
    let border = "=".repeat(50);
    println!("\n{}", border.cyan());
    println!("{}", text.cyan());
    println!("{}\n", border.cyan());
}
