//! Intent renderers: read the store and build a [`Response`].

use depsense_vocab::{ConceptName, RelationKind};

use super::{Emphasis, Intent, Line, Outcome, Response, Section, SectionName};
use crate::knowledge_base::{Concept, ConceptStore};

fn join(names: &[ConceptName]) -> String {
    names
        .iter()
        .map(ConceptName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn heading(module: &str, suffix: &str, icon: &str) -> Line {
    let line = Line::plain(format!("{} ", icon)).push(module.to_uppercase(), Emphasis::Strong);
    if suffix.is_empty() {
        line
    } else {
        line.push(suffix, Emphasis::Plain)
    }
}

fn unknown(intent: Intent, message: String) -> Response {
    Response::new(intent, Outcome::UnknownConcept)
        .with_line(SectionName::Message, Line::plain(message))
}

fn unknown_module(intent: Intent, module: &str) -> Response {
    unknown(intent, format!("❓ I don't know '{}'.", module))
}

fn bullets(targets: &[ConceptName], prefix: &str) -> Vec<Line> {
    targets
        .iter()
        .map(|t| Line::plain(format!("{}{}", prefix, t)))
        .collect()
}

/// Identity card: category, alias, stable version, dependencies, conflicts.
pub fn what_is(store: &ConceptStore, module: &str) -> Response {
    let Some(concept) = store.lookup(module) else {
        return unknown(
            Intent::WhatIs,
            format!("❓ I don't know '{}'. Use /learn file.txt to teach me.", module),
        );
    };
    identity_card(concept, module)
}

fn identity_card(concept: &Concept, module: &str) -> Response {
    let relations = concept.relations();
    let mut response = Response::new(Intent::WhatIs, Outcome::Answered)
        .with_line(SectionName::Heading, heading(module, "", "📦"));

    let is_a = relations.targets(RelationKind::IsA);
    if !is_a.is_empty() {
        response = response.with_line(
            SectionName::Category,
            Line::plain(format!("   📖 It's a {}", join(is_a))),
        );
    }

    let aliases = relations.targets(RelationKind::AliasOf);
    if !aliases.is_empty() {
        response = response.with_line(
            SectionName::Alias,
            Line::plain(format!("   🔗 Alias of: {}", join(aliases))),
        );
    }

    if let Some(version) = relations.stable_version() {
        response = response.with_line(
            SectionName::StableVersion,
            Line::plain(format!("   🏷️ Stable version: {}", version)),
        );
    }

    let deps = relations.targets(RelationKind::DependsOn);
    if !deps.is_empty() {
        response = response.with_line(
            SectionName::Dependencies,
            Line::plain(format!("   📋 Depends on: {}", join(deps))),
        );
    }

    let conflicts = relations.targets(RelationKind::ConflictsWith);
    if !conflicts.is_empty() {
        response = response.with_line(
            SectionName::Conflicts,
            Line::plain("   ⚠️ Conflicts with: ").push(join(conflicts), Emphasis::Caution),
        );
    }

    response
}

/// What a module depends on.
pub fn dependencies(store: &ConceptStore, module: &str) -> Response {
    let Some(concept) = store.lookup(module) else {
        return unknown_module(Intent::DependsOn, module);
    };

    let deps = concept.relations().targets(RelationKind::DependsOn);
    if deps.is_empty() {
        return Response::new(Intent::DependsOn, Outcome::Answered).with_line(
            SectionName::Message,
            Line::plain(format!("📦 {} has no known dependencies.", module)),
        );
    }

    Response::new(Intent::DependsOn, Outcome::Answered)
        .with_line(SectionName::Heading, heading(module, " depends on:", "📦"))
        .with_section(Section::new(
            SectionName::Dependencies,
            bullets(deps, "   └─ "),
        ))
}

/// Which modules depend on this one.
pub fn required_by(store: &ConceptStore, module: &str) -> Response {
    let Some(concept) = store.lookup(module) else {
        return unknown_module(Intent::RequiredBy, module);
    };

    let users = concept.relations().targets(RelationKind::RequiredBy);
    if users.is_empty() {
        return Response::new(Intent::RequiredBy, Outcome::Answered).with_line(
            SectionName::Message,
            Line::plain(format!("📦 No known module depends on {}.", module)),
        );
    }

    Response::new(Intent::RequiredBy, Outcome::Answered)
        .with_line(SectionName::Heading, heading(module, " is used by:", "📦"))
        .with_section(Section::new(SectionName::UsedBy, bullets(users, "   └─ ")))
}

/// Known crash notes, a dependency hint, and remedies.
pub fn crash(store: &ConceptStore, module: &str) -> Response {
    let Some(concept) = store.lookup(module) else {
        return unknown_module(Intent::Crash, module);
    };

    let relations = concept.relations();
    let problems: Vec<Line> = concept
        .crash_contexts()
        .map(|p| Line::default().push("   ❌ ", Emphasis::Plain).push(p, Emphasis::Alert))
        .collect();
    let deps = relations.targets(RelationKind::DependsOn);
    let solutions = relations.targets(RelationKind::SolutionFor);

    let mut response = Response::new(Intent::Crash, Outcome::Answered).with_line(
        SectionName::Heading,
        heading(module, " - Possible issues:", "🔧"),
    );

    let nothing_known = problems.is_empty() && solutions.is_empty();
    if !problems.is_empty() {
        response = response.with_section(Section::new(SectionName::Problems, problems));
    }

    if !deps.is_empty() {
        response = response.with_section(
            Section::single(
                SectionName::Dependencies,
                Line::plain(format!("   📋 Check dependencies: {}", join(deps))),
            )
            .spaced(),
        );
    }

    if !solutions.is_empty() {
        let mut lines = vec![Line::plain("   ✅ Solutions:")];
        lines.extend(
            solutions
                .iter()
                .map(|s| Line::plain("      → ").push(s.as_str(), Emphasis::Positive)),
        );
        response = response.with_section(Section::new(SectionName::Solutions, lines).spaced());
    }

    if nothing_known {
        response = response.with_line(
            SectionName::Message,
            Line::plain("   🤷 No crash info for this module."),
        );
    }

    response
}

/// Whether two modules can be used together.
pub fn compatibility(store: &ConceptStore, first: &str, second: &str) -> Response {
    let (a, b) = match (store.lookup(first), store.lookup(second)) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => {
            let missing = match (a, b) {
                (None, None) => "both",
                (None, _) => first,
                _ => second,
            };
            return unknown(Intent::Compatibility, format!("❓ I don't know {}.", missing));
        }
    };

    let conflicting = a
        .relations()
        .contains(RelationKind::ConflictsWith, b.name().as_str())
        || b.relations()
            .contains(RelationKind::ConflictsWith, a.name().as_str());

    if conflicting {
        Response::new(Intent::Compatibility, Outcome::Answered)
            .with_line(
                SectionName::Warning,
                Line::plain("⚠️ ")
                    .push("CONFLICT DETECTED", Emphasis::Alert)
                    .push(format!(" between {} and {}!", first, second), Emphasis::Plain),
            )
            .with_line(
                SectionName::Tip,
                Line::plain("   💡 Tip: use separate environments (venv)"),
            )
    } else {
        Response::new(Intent::Compatibility, Outcome::Answered).with_line(
            SectionName::Message,
            Line::plain("✅ ")
                .push("Compatible", Emphasis::Positive)
                .push(format!(": {} and {} can coexist.", first, second), Emphasis::Plain),
        )
    }
}

/// Install instructions, plus what comes along and what may clash.
pub fn install(store: &ConceptStore, module: &str) -> Response {
    let mut response = Response::new(Intent::Install, Outcome::Answered)
        .with_line(
            SectionName::Heading,
            Line::plain("📥 Installing ")
                .push(module, Emphasis::Strong)
                .push(":", Emphasis::Plain),
        )
        .with_line(
            SectionName::Command,
            Line::plain(format!("   $ pip install {}", module)),
        );

    let Some(concept) = store.lookup(module) else {
        return response;
    };

    let deps = concept.relations().targets(RelationKind::DependsOn);
    if !deps.is_empty() {
        response = response.with_section(
            Section::single(
                SectionName::Dependencies,
                Line::plain(format!("   📋 Will also install: {}", join(deps))),
            )
            .spaced(),
        );
    }

    let conflicts = concept.relations().targets(RelationKind::ConflictsWith);
    if !conflicts.is_empty() {
        response = response
            .with_section(
                Section::single(
                    SectionName::Warning,
                    Line::plain("   ⚠️ ")
                        .push("Warning", Emphasis::Caution)
                        .push(format!(": may conflict with {}", join(conflicts)), Emphasis::Plain),
                )
                .spaced(),
            )
            .with_line(
                SectionName::Tip,
                Line::plain("   💡 Tip: check with 'pip list' first"),
            );
    }

    response
}

/// The fixed reply for questions nothing matched.
pub fn not_understood() -> Response {
    Response::new(Intent::Unrecognized, Outcome::NotUnderstood).with_line(
        SectionName::Message,
        Line::plain("❓ I don't understand the question. Try: what is numpy"),
    )
}
