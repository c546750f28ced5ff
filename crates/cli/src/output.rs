//! Terminal output for plugbuild commands.
//!
//! Status lines go to stdout, warnings and errors to stderr. Colors are only
//! emitted when the stream supports them.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

#[derive(Clone, Copy)]
enum Status {
  Success,
  Error,
  Warning,
  Info,
}

impl Status {
  fn symbol(self) -> &'static str {
    match self {
      Status::Success => symbols::SUCCESS,
      Status::Error => symbols::ERROR,
      Status::Warning => symbols::WARNING,
      Status::Info => symbols::INFO,
    }
  }

  fn stream(self) -> Stream {
    match self {
      Status::Success | Status::Info => Stream::Stdout,
      Status::Error | Status::Warning => Stream::Stderr,
    }
  }

  /// Errors and warnings color the whole line, the rest only the symbol.
  fn colors_message(self) -> bool {
    matches!(self, Status::Error | Status::Warning)
  }

  fn paint(self, text: &str) -> String {
    let stream = self.stream();
    match self {
      Status::Success => text.if_supports_color(stream, |s| s.green()).to_string(),
      Status::Error => text.if_supports_color(stream, |s| s.red()).to_string(),
      Status::Warning => text.if_supports_color(stream, |s| s.yellow()).to_string(),
      Status::Info => text.if_supports_color(stream, |s| s.blue()).to_string(),
    }
  }
}

fn status_line(status: Status, message: &str) {
  let message = if status.colors_message() {
    status.paint(message)
  } else {
    message.to_string()
  };
  let line = format!("{} {}", status.paint(status.symbol()), message);

  match status.stream() {
    Stream::Stderr => eprintln!("{}", line),
    _ => println!("{}", line),
  }
}

/// `1m 5s`, `1.50s` or `50ms`.
pub fn format_duration(duration: Duration) -> String {
  let (secs, millis) = (duration.as_secs(), duration.subsec_millis());
  match secs {
    0 => format!("{}ms", millis),
    1..=59 => format!("{}.{:02}s", secs, millis / 10),
    _ => format!("{}m {}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: &str) {
  status_line(Status::Success, message);
}

pub fn print_error(message: &str) {
  status_line(Status::Error, message);
}

pub fn print_warning(message: &str) {
  status_line(Status::Warning, message);
}

pub fn print_info(message: &str) {
  status_line(Status::Info, message);
}

/// Indented `label: value` line under a heading.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// A command line that would run, indented below its cell.
pub fn print_step(command: &str) {
  println!(
    "    {} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    command
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
