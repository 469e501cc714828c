//! Runs every check over a class string and collects the diagnostics.

use crate::catalog::{is_marker_class, is_valid_class};
use crate::conflicts::{cross_scope_conflicts, detect_conflicts, detect_duplicates};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::scope::parse_variant_class;
use crate::theme::{
    ThemeVariableRegistry, invalid_color_variable_name, invalid_theme_token_name,
    is_valid_css_property_name, theme_token_for_class,
};
use crate::variants::unsupported_variants;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything a validation pass reads besides the class string itself.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    pub registry: &'a ThemeVariableRegistry,
    /// Kinds reported as errors regardless of their default severity.
    pub escalated: BTreeSet<DiagnosticKind>,
    /// Classes already applied to the same target by earlier calls.
    pub previous: Vec<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(registry: &'a ThemeVariableRegistry) -> Self {
        Self {
            registry,
            escalated: BTreeSet::new(),
            previous: Vec::new(),
        }
    }

    pub fn with_escalated(mut self, kinds: impl IntoIterator<Item = DiagnosticKind>) -> Self {
        self.escalated.extend(kinds);
        self
    }

    pub fn with_previous<S: Into<String>>(mut self, previous: impl IntoIterator<Item = S>) -> Self {
        self.previous = previous.into_iter().map(Into::into).collect();
        self
    }
}

/// Diagnostics for one class string, tagged with the caller's locator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Located<L> {
    pub location: L,
    pub class_string: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl<L> Located<L> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub fn validate(class_string: &str, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
    let tokens = ctx.registry.expand_aliases(class_string);
    let mut diagnostics = Vec::new();

    for token in &tokens {
        check_token(token, &mut diagnostics);
    }

    diagnostics.extend(detect_conflicts(&tokens).into_iter().map(|conflict| {
        Diagnostic::conflicting_styles(&conflict.previous, &conflict.current, &conflict.scope)
    }));
    diagnostics.extend(
        detect_duplicates(&tokens)
            .into_iter()
            .map(|duplicate| Diagnostic::duplicate_style(&duplicate.token, &duplicate.scope)),
    );
    if !ctx.previous.is_empty() {
        diagnostics.extend(
            cross_scope_conflicts(&ctx.previous, &tokens)
                .into_iter()
                .map(|conflict| {
                    Diagnostic::conflicting_styles(
                        &conflict.previous,
                        &conflict.current,
                        &conflict.scope,
                    )
                }),
        );
    }

    if ctx.escalated.is_empty() {
        return diagnostics;
    }
    diagnostics
        .into_iter()
        .map(|diagnostic| {
            if ctx.escalated.contains(&diagnostic.kind) {
                diagnostic.escalate()
            } else {
                diagnostic
            }
        })
        .collect()
}

/// Validates each class string on its own, in order.
pub fn validate_all<S: AsRef<str>>(
    class_strings: &[S],
    ctx: &ValidationContext<'_>,
) -> Vec<Vec<Diagnostic>> {
    class_strings
        .iter()
        .map(|class_string| validate(class_string.as_ref(), ctx))
        .collect()
}

/// Parallel [`validate`] over `(class string, location)` pairs. Results keep
/// the input order.
pub fn validate_batch<L>(items: &[(String, L)], ctx: &ValidationContext<'_>) -> Vec<Located<L>>
where
    L: Clone + Send + Sync,
{
    tracing::debug!(items = items.len(), "validating batch");
    let located = items
        .par_iter()
        .map(|(class_string, location)| Located {
            location: location.clone(),
            class_string: class_string.clone(),
            diagnostics: validate(class_string, ctx),
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        flagged = located
            .iter()
            .filter(|entry| !entry.diagnostics.is_empty())
            .count(),
        "batch validated"
    );
    located
}

fn check_token(token: &str, diagnostics: &mut Vec<Diagnostic>) {
    let parsed = parse_variant_class(token);
    for variant in unsupported_variants(token) {
        diagnostics.push(Diagnostic::unsupported_variant(token, &variant));
    }

    let base = parsed.base;
    if is_marker_class(base) {
        return;
    }
    if !is_valid_class(base) {
        tracing::trace!(token, "unknown class");
        diagnostics.push(Diagnostic::unknown_class(token, base));
        return;
    }

    if let Some(variable) = invalid_color_variable_name(base) {
        diagnostics.push(Diagnostic::invalid_color_variable(token, &variable));
    } else if let Some((kind, variable)) = theme_token_for_class(base) {
        if let Some(issue) = invalid_theme_token_name(&variable, kind) {
            diagnostics.push(Diagnostic::invalid_theme_token(token, issue.message()));
        }
    }

    if let Some(property) = arbitrary_property_name(base) {
        if !is_valid_css_property_name(property) {
            diagnostics.push(Diagnostic::invalid_css_property(token, property));
        }
    }
}

/// `[--gap:1rem]` declares `--gap`. Arbitrary values such as `bg-[...]` are
/// not property declarations.
fn arbitrary_property_name(base: &str) -> Option<&str> {
    let inner = base.strip_prefix('[')?.strip_suffix(']')?;
    let (property, _) = inner.split_once(':')?;
    Some(property.trim())
}
