//! Question templates, each paired with the renderer that answers it.

use lazy_static::lazy_static;
use regex::Regex;

use super::{render, Intent, Response};
use crate::knowledge_base::ConceptStore;

/// Builds a response from the store and the captured module names.
pub type Renderer = fn(&ConceptStore, &[&str]) -> Response;

/// An intent's templates in priority order and its renderer.
pub struct IntentRule {
    pub intent: Intent,
    pub templates: Vec<Regex>,
    pub render: Renderer,
}

impl IntentRule {
    fn new(intent: Intent, templates: &[&str], render: Renderer) -> Self {
        Self {
            intent,
            templates: templates
                .iter()
                .map(|t| Regex::new(t).expect("intent template"))
                .collect(),
            render,
        }
    }

    /// Capture groups of the first template that matches.
    pub fn first_match<'q>(&self, question: &'q str) -> Option<Vec<&'q str>> {
        let caps = self.templates.iter().find_map(|re| re.captures(question))?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or("", |m| m.as_str()))
                .collect(),
        )
    }
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule")
            .field("intent", &self.intent)
            .field("templates", &self.templates.len())
            .finish()
    }
}

fn arg<'a>(args: &[&'a str], index: usize) -> &'a str {
    args.get(index).copied().unwrap_or_default()
}

lazy_static! {
    /// Intent rules in priority order. The first rule with a matching
    /// template answers the question.
    pub static ref INTENT_RULES: Vec<IntentRule> = vec![
        IntentRule::new(Intent::WhatIs, &[
            r"what\s+is\s+(\w+)",
            r"what'?s\s+(\w+)",
            r"tell\s+me\s+about\s+(\w+)",
        ], |store, args| render::what_is(store, arg(args, 0))),
        IntentRule::new(Intent::DependsOn, &[
            r"what\s+does\s+(\w+)\s+depend\s+on",
            r"(\w+)\s+depends?\s+on\s+what",
            r"dependencies\s+(?:of|for)\s+(\w+)",
        ], |store, args| render::dependencies(store, arg(args, 0))),
        IntentRule::new(Intent::RequiredBy, &[
            r"who\s+uses?\s+(\w+)",
            r"what\s+uses?\s+(\w+)",
            r"what\s+requires?\s+(\w+)",
        ], |store, args| render::required_by(store, arg(args, 0))),
        IntentRule::new(Intent::Crash, &[
            r"why\s+(?:does\s+)?(\w+)\s+crash",
            r"(\w+)\s+(?:is\s+)?crashing",
            r"(\w+)\s+doesn'?t?\s+work",
        ], |store, args| render::crash(store, arg(args, 0))),
        IntentRule::new(Intent::Compatibility, &[
            r"(?:are\s+)?(\w+)\s+and\s+(\w+)\s+compatible",
            r"can\s+(?:i\s+)?use\s+(\w+)\s+with\s+(\w+)",
            r"(\w+)\s+(?:works?\s+)?with\s+(\w+)\s*\?",
        ], |store, args| render::compatibility(store, arg(args, 0), arg(args, 1))),
        IntentRule::new(Intent::Install, &[
            r"(?:how\s+(?:do\s+i\s+)?)?install\s+(\w+)",
            r"i\s+want\s+(?:to\s+)?install\s+(\w+)",
        ], |store, args| render::install(store, arg(args, 0))),
    ];
}
