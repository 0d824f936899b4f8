//! Terminal styling for responses. The only place colors exist.

use std::io::IsTerminal;

use depsense_core::{Emphasis, Line, Response};
use depsense_vocab::ColorChoice;

const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Applies ANSI colors when enabled.
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        };
        Self { enabled }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.enabled {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn banner(&self, text: &str) -> String {
        self.paint(text, CYAN)
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, GREEN)
    }

    pub fn hint(&self, text: &str) -> String {
        self.paint(text, YELLOW)
    }

    fn line(&self, line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| match span.emphasis {
                Emphasis::Plain => span.text.clone(),
                Emphasis::Strong => self.paint(&span.text, BOLD),
                Emphasis::Caution => self.paint(&span.text, YELLOW),
                Emphasis::Alert => self.paint(&span.text, RED),
                Emphasis::Positive => self.paint(&span.text, GREEN),
            })
            .collect()
    }

    /// Render a response, styled.
    pub fn response(&self, response: &Response) -> String {
        let mut out = Vec::new();
        for section in &response.sections {
            for (i, line) in section.lines.iter().enumerate() {
                let rendered = self.line(line);
                if i == 0 && section.spaced {
                    out.push(format!("\n{}", rendered));
                } else {
                    out.push(rendered);
                }
            }
        }
        out.join("\n")
    }
}
