//! Structured answers, kept free of any terminal styling.

use serde::{Deserialize, Serialize};

/// The question category an answer was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    WhatIs,
    DependsOn,
    RequiredBy,
    Crash,
    Compatibility,
    Install,
    /// No template matched and no known concept was mentioned.
    Unrecognized,
}

/// How the answer relates to the store's knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Answered,
    /// The question named a concept the store has never seen.
    UnknownConcept,
    NotUnderstood,
}

/// Presentation hint for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Emphasis {
    #[default]
    Plain,
    /// Module names in headings.
    Strong,
    /// Something to be careful about.
    Caution,
    /// A detected problem.
    Alert,
    /// A confirmation.
    Positive,
}

/// A run of text with one emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

/// One output line made of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line holding a single plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::default().push(text, Emphasis::Plain)
    }

    /// Append a span.
    pub fn push(mut self, text: impl Into<String>, emphasis: Emphasis) -> Self {
        self.spans.push(Span {
            text: text.into(),
            emphasis,
        });
        self
    }

    /// Concatenated text without emphasis.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Section names of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Heading,
    Category,
    Alias,
    StableVersion,
    Dependencies,
    Conflicts,
    UsedBy,
    Problems,
    Solutions,
    Command,
    Warning,
    Tip,
    Message,
}

/// A named group of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: SectionName,
    /// Preceded by a blank line when rendered.
    pub spaced: bool,
    pub lines: Vec<Line>,
}

impl Section {
    pub fn new(name: SectionName, lines: Vec<Line>) -> Self {
        Self {
            name,
            spaced: false,
            lines,
        }
    }

    /// A section holding one line.
    pub fn single(name: SectionName, line: Line) -> Self {
        Self::new(name, vec![line])
    }

    /// Render with a blank line before it.
    pub fn spaced(mut self) -> Self {
        self.spaced = true;
        self
    }
}

/// A rendered answer: section name to content, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub intent: Intent,
    pub outcome: Outcome,
    pub sections: Vec<Section>,
}

impl Response {
    pub fn new(intent: Intent, outcome: Outcome) -> Self {
        Self {
            intent,
            outcome,
            sections: Vec::new(),
        }
    }

    /// Add a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Add a one-line section.
    pub fn with_line(self, name: SectionName, line: Line) -> Self {
        self.with_section(Section::single(name, line))
    }

    /// Get a section by name.
    pub fn section(&self, name: SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: SectionName) -> bool {
        self.section(name).is_some()
    }

    /// Format the response as plain text.
    pub fn to_plain_string(&self) -> String {
        let mut lines = Vec::new();
        for section in &self.sections {
            for (i, line) in section.lines.iter().enumerate() {
                if i == 0 && section.spaced {
                    lines.push(format!("\n{}", line.text()));
                } else {
                    lines.push(line.text());
                }
            }
        }
        lines.join("\n")
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
