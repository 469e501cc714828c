use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnknownClass,
    UnsupportedVariant,
    ConflictingStyles,
    DuplicateStyle,
    InvalidColorVariableUsage,
    InvalidThemeTokenName,
    InvalidCssPropertyName,
    RequiresLiteral,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::RequiresLiteral => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// A finding about one token. Produced, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub token: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, token: impl Into<String>, message: String) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
            message,
            token: token.into(),
        }
    }

    pub fn unknown_class(token: &str, base: &str) -> Self {
        Self::new(
            DiagnosticKind::UnknownClass,
            token,
            format!("Unknown Tailwind class '{}'", base),
        )
    }

    pub fn unsupported_variant(token: &str, variant: &str) -> Self {
        Self::new(
            DiagnosticKind::UnsupportedVariant,
            token,
            format!("Unsupported Tailwind variant '{}:'", variant),
        )
    }

    pub fn conflicting_styles(previous: &str, current: &str, scope: &str) -> Self {
        Self::new(
            DiagnosticKind::ConflictingStyles,
            current,
            format!(
                "Conflicting styles '{}' and '{}' in the same {}.",
                previous,
                current,
                scope_label(scope)
            ),
        )
    }

    pub fn duplicate_style(token: &str, scope: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicateStyle,
            token,
            format!(
                "Duplicate style '{}' in the same {}.",
                token,
                scope_label(scope)
            ),
        )
    }

    pub fn invalid_color_variable(token: &str, variable: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidColorVariableUsage,
            token,
            format!(
                "Color utility '{}' references '{}'; color variables must be named --color-* or --tw-color-*.",
                token, variable
            ),
        )
    }

    pub fn invalid_theme_token(token: &str, message: String) -> Self {
        Self::new(DiagnosticKind::InvalidThemeTokenName, token, message)
    }

    pub fn invalid_css_property(token: &str, property: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidCssPropertyName,
            token,
            format!("Invalid CSS property name '{}'", property),
        )
    }

    /// For hosts that only accept string literals (compile-time integrations).
    pub fn requires_literal(token: &str) -> Self {
        Self::new(
            DiagnosticKind::RequiresLiteral,
            token,
            "Tailwind classes must be given as a string literal".to_string(),
        )
    }

    pub fn escalate(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

fn scope_label(scope: &str) -> String {
    if scope.is_empty() {
        "scope".to_string()
    } else {
        format!("'{}' scope", scope)
    }
}
