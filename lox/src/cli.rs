use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints log records through the same right-aligned prefix as the status lines.
struct PrefixLogger;

static LOGGER: PrefixLogger = PrefixLogger;

impl Log for PrefixLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (prefix, color) = match record.level() {
            Level::Error => ("error", Color::Red),
            Level::Warn => ("warning", Color::Yellow),
            Level::Info => ("info", Color::Cyan),
            Level::Debug => ("debug", Color::Blue),
            Level::Trace => ("trace", Color::White),
        };

        print_colourful_prefix(prefix, color, &record.args().to_string());
    }

    fn flush(&self) {}
}

/// Installs the stderr logger. Each `-v` lowers the threshold by one level,
/// starting from `warn`.
pub fn init_logger(verbose: u8) {
    let level = level_filter(verbose);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
