//! Terminal rendering of markdown reports
//!
//! Rich mode renders through termimad with headers, status lines and
//! urgency tags colored. Plain mode prints the markdown unchanged, which is
//! what tests and pipes get with `--no-color`.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_color(line) {
                // Headers keep their hashes so the report hierarchy stays
                // visible
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

fn line_color(line: &str) -> Option<&'static str> {
    if line.starts_with("Error:") || line.contains("[immediate]") || line.ends_with("CRITICAL") {
        Some(RED)
    } else if line.starts_with("Success:") {
        Some(GREEN)
    } else if line.starts_with('#') {
        Some(BLUE)
    } else {
        None
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_line_colors() {
        assert_eq!(line_color("# Project health: CRITICAL"), Some(RED));
        assert_eq!(line_color("# Project health: HEALTHY"), Some(BLUE));
        assert_eq!(line_color("Success: Stored setting from_email"), Some(GREEN));
        assert_eq!(line_color("- [immediate] PRJ-2: Card form"), Some(RED));
        assert_eq!(line_color("- Completion: 50.0%"), None);
    }
}
