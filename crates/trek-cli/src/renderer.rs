//! Terminal rendering for command results.
//!
//! Results are printed as markdown styled with termimad, as plain markdown
//! when colors are disabled, or as pretty JSON for scripts.

use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;
use termimad::{crossterm::style::Color, MadSkin};
use trek_core::display::to_json;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rich,
    Plain,
    Json,
}

impl OutputFormat {
    /// JSON wins over the color setting.
    pub fn select(json: bool, no_color: bool) -> Self {
        match (json, no_color) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Plain,
            (false, false) => OutputFormat::Rich,
        }
    }
}

/// Terminal renderer for the selected output format
pub struct TerminalRenderer {
    format: OutputFormat,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(format: OutputFormat) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::DarkGreen);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { format, skin }
    }

    /// Writes `value` as JSON, or `markdown` in the other formats.
    pub fn emit<T: Serialize>(&self, value: &T, markdown: impl Display) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json(value)?),
            OutputFormat::Plain => print!("{markdown}"),
            OutputFormat::Rich => self.render(&markdown.to_string()),
        }
        Ok(())
    }

    fn render(&self, markdown: &str) {
        for line in markdown.lines() {
            // Headers keep their hash marks so the outline stays visible.
            if line.starts_with('#') {
                println!("\x1b[32m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(OutputFormat::Rich)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_takes_precedence() {
        assert_eq!(OutputFormat::select(true, true), OutputFormat::Json);
        assert_eq!(OutputFormat::select(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::select(false, true), OutputFormat::Plain);
        assert_eq!(OutputFormat::select(false, false), OutputFormat::Rich);
    }

    #[test]
    fn test_default_is_rich() {
        assert_eq!(TerminalRenderer::default().format, OutputFormat::Rich);
    }
}
