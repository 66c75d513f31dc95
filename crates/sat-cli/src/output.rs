//! Human-facing output on stdout.
//!
//! Status lines honour `--quiet` and colour settings. Documents (archive
//! configs, plugin listings) are always written, as JSON or YAML.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => parse_format(&config.output.format),
            explicit => explicit,
        };

        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Plain line on stdout; dropped under `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(|| msg.to_owned())
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Success, msg)
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Warning, msg)
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.emit(|| {
            if self.no_color {
                text.to_owned()
            } else {
                text.cyan().bold().to_string()
            }
        })
    }

    /// Indented `key value` pair, key padded to a fixed column.
    pub fn field(&self, key: &str, value: &str) -> io::Result<()> {
        self.emit(|| {
            let key = format!("{key:<12}");
            if self.no_color {
                format!("  {key} {value}")
            } else {
                format!("  {} {value}", key.dimmed())
            }
        })
    }

    fn marked(&self, tone: Tone, msg: &str) -> io::Result<()> {
        self.emit(|| {
            let symbol = tone.symbol();
            if self.no_color {
                format!("{symbol} {msg}")
            } else {
                let color = tone.color();
                format!("{} {}", symbol.color(color).bold(), msg.color(color))
            }
        })
    }

    fn emit(&self, line: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line())
    }

    /// Print a document the user asked for.
    ///
    /// Never suppressed by `--quiet`: the document is the command's result.
    pub fn document<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = self.render(value)?;
        self.term.write_line(text.trim_end())?;
        Ok(())
    }

    /// JSON when the output format is `json`, YAML otherwise.
    pub fn render<T: Serialize>(&self, value: &T) -> CliResult<String> {
        let rendered = if self.resolved_format == OutputFormat::Json {
            serde_json::to_string_pretty(value).map_err(|e| e.to_string())
        } else {
            serde_yaml::to_string(value).map_err(|e| e.to_string())
        };
        rendered.map_err(|message| CliError::InvalidInput {
            message: format!("value cannot be rendered: {message}"),
            source: None,
        })
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Self::Success => AnsiColors::Green,
            Self::Warning => AnsiColors::Yellow,
            Self::Info => AnsiColors::Blue,
        }
    }
}

fn parse_format(raw: &str) -> OutputFormat {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}
