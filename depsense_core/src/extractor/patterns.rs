//! Detection templates for turning sentences into facts.
//!
//! Each rule lists its templates in priority order. Only the first template
//! that matches is used for a rule, but every rule is searched independently,
//! so one sentence can yield several facts.

use lazy_static::lazy_static;
use regex::Regex;

/// The detection groups, one per kind of fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionKind {
    Category,
    Alias,
    Dependency,
    Conflict,
    StableVersion,
    Solution,
    Crash,
}

/// An ordered list of templates that all bind (subject, object).
#[derive(Debug)]
pub struct DetectionRule {
    pub kind: DetectionKind,
    pub templates: Vec<Regex>,
}

impl DetectionRule {
    fn new(kind: DetectionKind, templates: &[&str]) -> Self {
        Self {
            kind,
            templates: templates
                .iter()
                .map(|t| Regex::new(t).expect("detection template"))
                .collect(),
        }
    }

    /// Both captures of the first template that matches.
    pub fn first_match<'s>(&self, sentence: &'s str) -> Option<(&'s str, &'s str)> {
        let caps = self.templates.iter().find_map(|re| re.captures(sentence))?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

lazy_static! {
    /// Word tokens.
    pub static ref WORD: Regex = Regex::new(r"\b\w+\b").expect("word pattern");

    /// All detection rules, in the order facts are produced.
    pub static ref DETECTION_RULES: Vec<DetectionRule> = vec![
        DetectionRule::new(DetectionKind::Category, &[
            r"(\w+)\s+is\s+(?:a|an)\s+(\w+)",
            r"(\w+)\s+are\s+(\w+)s?",
        ]),
        // "x = y" also fires on equation-like text
        DetectionRule::new(DetectionKind::Alias, &[
            r"(\w+)\s+is\s+(?:an\s+)?alias\s+(?:of|for)\s+(\w+)",
            r"(\w+)\s*=\s*(\w+)",
        ]),
        DetectionRule::new(DetectionKind::Dependency, &[
            r"(\w+)\s+depends?\s+on\s+(\w+)",
            r"(\w+)\s+requires?\s+(\w+)",
            r"(\w+)\s+needs?\s+(\w+)",
        ]),
        DetectionRule::new(DetectionKind::Conflict, &[
            r"(\w+)\s+and\s+(\w+)\s+(?:have\s+a\s+)?conflict",
            r"(\w+)\s+conflicts?\s+with\s+(\w+)",
            r"(\w+)\s+(?:is\s+)?incompatible\s+with\s+(\w+)",
        ]),
        DetectionRule::new(DetectionKind::StableVersion, &[
            r"(\w+)\s+stable\s+version\s+(?:is\s+)?(\d+[\d\.]*)",
            r"(\w+)\s+version\s+(\d+[\d\.]*)\s+(?:is\s+)?stable",
        ]),
        DetectionRule::new(DetectionKind::Solution, &[
            r"to\s+fix\s+(\w+).*?(?:you\s+need|install|use)\s+(\w+)",
            r"solution\s+for\s+(\w+).*?(?:is|:)\s+(\w+)",
            r"if\s+(\w+)\s+crashes?.*?(?:upgrade|update|install)\s+(\w+)",
        ]),
        DetectionRule::new(DetectionKind::Crash, &[
            r"(\w+)\s+crashes?\s+(?:if|when|because)\s+(.+)",
        ]),
    ];
}
