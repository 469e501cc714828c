//! Theme tokens: custom-property naming rules and the variable registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeTokenKind {
    Color,
    Spacing,
    Radius,
    Shadow,
    Font,
    FontWeight,
    Text,
    Tracking,
    Leading,
    Blur,
    Duration,
    Delay,
    Ease,
    Animate,
    Opacity,
    Outline,
    Ring,
    RingOffset,
    BorderWidth,
    ZIndex,
}

impl ThemeTokenKind {
    /// Name prefixes a custom property must carry for this kind.
    pub fn expected_prefixes(self) -> &'static [&'static str] {
        match self {
            ThemeTokenKind::Color => &["--color-", "--tw-color-"],
            ThemeTokenKind::Spacing => &["--spacing-", "--tw-spacing-"],
            ThemeTokenKind::Radius => &["--radius-", "--tw-radius-"],
            ThemeTokenKind::Shadow => &["--shadow-", "--tw-shadow-"],
            ThemeTokenKind::Font => &["--font-", "--tw-font-"],
            ThemeTokenKind::FontWeight => &["--font-weight-", "--tw-font-weight-"],
            ThemeTokenKind::Text => &["--text-", "--tw-text-"],
            ThemeTokenKind::Tracking => &["--tracking-", "--tw-tracking-"],
            ThemeTokenKind::Leading => &["--leading-", "--tw-leading-"],
            ThemeTokenKind::Blur => &["--blur-", "--tw-blur-"],
            ThemeTokenKind::Duration => &["--duration-", "--tw-duration-"],
            ThemeTokenKind::Delay => &["--delay-", "--tw-delay-"],
            ThemeTokenKind::Ease => &["--ease-", "--tw-ease-"],
            ThemeTokenKind::Animate => &["--animate-", "--tw-animate-"],
            ThemeTokenKind::Opacity => &["--opacity-", "--tw-opacity-"],
            ThemeTokenKind::Outline => &["--outline-", "--tw-outline-"],
            ThemeTokenKind::Ring => &["--ring-", "--tw-ring-"],
            ThemeTokenKind::RingOffset => &["--ring-offset-", "--tw-ring-offset-"],
            ThemeTokenKind::BorderWidth => &["--border-width-", "--tw-border-width-"],
            ThemeTokenKind::ZIndex => &["--z-index-", "--tw-z-index-"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeTokenKind::Color => "color",
            ThemeTokenKind::Spacing => "spacing",
            ThemeTokenKind::Radius => "radius",
            ThemeTokenKind::Shadow => "shadow",
            ThemeTokenKind::Font => "font",
            ThemeTokenKind::FontWeight => "font-weight",
            ThemeTokenKind::Text => "text",
            ThemeTokenKind::Tracking => "tracking",
            ThemeTokenKind::Leading => "leading",
            ThemeTokenKind::Blur => "blur",
            ThemeTokenKind::Duration => "duration",
            ThemeTokenKind::Delay => "delay",
            ThemeTokenKind::Ease => "ease",
            ThemeTokenKind::Animate => "animate",
            ThemeTokenKind::Opacity => "opacity",
            ThemeTokenKind::Outline => "outline",
            ThemeTokenKind::Ring => "ring",
            ThemeTokenKind::RingOffset => "ring-offset",
            ThemeTokenKind::BorderWidth => "border-width",
            ThemeTokenKind::ZIndex => "z-index",
        }
    }
}

impl fmt::Display for ThemeTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A custom property that does not follow its kind's naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTokenIssue {
    pub token: String,
    pub kind: ThemeTokenKind,
    pub expected: &'static [&'static str],
}

impl ThemeTokenIssue {
    pub fn message(&self) -> String {
        format!(
            "Theme token '{}' used for {} should start with {}.",
            self.token,
            self.kind,
            self.expected.join(" or ")
        )
    }
}

/// Checks `token` against the prefixes required for `kind`.
///
/// Comparison is case-insensitive and ignores a `var(...)` wrapper and the
/// leading `--`. A token that normalizes to nothing is reported as well.
pub fn invalid_theme_token_name(token: &str, kind: ThemeTokenKind) -> Option<ThemeTokenIssue> {
    let normalized = normalize_token_name(token);
    let issue = ThemeTokenIssue {
        token: token.to_string(),
        kind,
        expected: kind.expected_prefixes(),
    };
    if normalized.is_empty() {
        return Some(issue);
    }

    let matches = kind
        .expected_prefixes()
        .iter()
        .any(|prefix| normalized.starts_with(&normalize_token_name(prefix)));
    if matches { None } else { Some(issue) }
}

fn normalize_token_name(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let inner = lowered
        .strip_prefix("var(")
        .and_then(|value| value.strip_suffix(')'))
        .map(|value| value.split(',').next().unwrap_or(value).trim())
        .unwrap_or(lowered.as_str());
    inner.strip_prefix("--").unwrap_or(inner).to_string()
}

/// Returns the `--name` referenced by `var(--name)`, `(--name)` or `--name`.
pub fn extract_custom_property_token(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix("var(")
        .or_else(|| trimmed.strip_prefix('('))
        .map(|rest| rest.strip_suffix(')'))
        .unwrap_or(Some(trimmed))?;

    // `var(--x, fallback)` names `--x`.
    let name = inner.split(',').next().unwrap_or(inner).trim();
    if name.len() > 2 && name.starts_with("--") && !name.contains(char::is_whitespace) {
        Some(name.to_string())
    } else {
        None
    }
}

pub(crate) const COLOR_PREFIXES: &[&str] = &[
    "ring-offset-",
    "placeholder-",
    "decoration-",
    "outline-",
    "border-",
    "accent-",
    "stroke-",
    "caret-",
    "text-",
    "ring-",
    "fill-",
    "bg-",
];

/// Returns the custom property referenced by a color utility when it is not
/// namespaced as a color (`--color-*` or `--tw-color-*`).
pub fn invalid_color_variable_name(base_class: &str) -> Option<String> {
    let raw = COLOR_PREFIXES
        .iter()
        .find_map(|prefix| base_class.strip_prefix(prefix))?;
    let (value, _) = crate::scope::split_alpha_suffix(raw);
    let token = color_value_custom_property(value)?;
    invalid_theme_token_name(&token, ThemeTokenKind::Color).map(|_| token)
}

/// Custom property referenced by a color value, if any. Image-like bracket
/// values are not color references.
pub(crate) fn color_value_custom_property(value: &str) -> Option<String> {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        if looks_like_image_value(inner) {
            return None;
        }
        let inner = inner.strip_prefix("color:").unwrap_or(inner);
        if inner.starts_with("var(") || inner.starts_with("--") {
            return extract_custom_property_token(inner);
        }
        return None;
    }
    if value.starts_with('(') || value.starts_with("var(") {
        let inner = value.strip_prefix("(color:").map(|rest| format!("({}", rest));
        return extract_custom_property_token(inner.as_deref().unwrap_or(value));
    }
    None
}

fn looks_like_image_value(inner: &str) -> bool {
    let lowered = inner.to_ascii_lowercase();
    lowered.starts_with("url(")
        || lowered.starts_with("image:")
        || lowered.contains("gradient(")
}

/// Accepts `--custom` names and property-like tokens (`-?[A-Za-z][A-Za-z0-9-]*`).
pub fn is_valid_css_property_name(raw: &str) -> bool {
    if raw.is_empty() || raw.contains(char::is_whitespace) {
        return false;
    }
    if raw.starts_with("--") {
        return raw.len() > 2;
    }

    let body = raw.strip_prefix('-').unwrap_or(raw);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

const KIND_PREFIXES: &[(&str, ThemeTokenKind)] = &[
    ("drop-shadow-", ThemeTokenKind::Shadow),
    ("space-x-", ThemeTokenKind::Spacing),
    ("space-y-", ThemeTokenKind::Spacing),
    ("duration-", ThemeTokenKind::Duration),
    ("inset-x-", ThemeTokenKind::Spacing),
    ("inset-y-", ThemeTokenKind::Spacing),
    ("tracking-", ThemeTokenKind::Tracking),
    ("animate-", ThemeTokenKind::Animate),
    ("leading-", ThemeTokenKind::Leading),
    ("opacity-", ThemeTokenKind::Opacity),
    ("rounded-", ThemeTokenKind::Radius),
    ("bottom-", ThemeTokenKind::Spacing),
    ("inset-", ThemeTokenKind::Spacing),
    ("max-h-", ThemeTokenKind::Spacing),
    ("max-w-", ThemeTokenKind::Spacing),
    ("min-h-", ThemeTokenKind::Spacing),
    ("min-w-", ThemeTokenKind::Spacing),
    ("right-", ThemeTokenKind::Spacing),
    ("shadow-", ThemeTokenKind::Shadow),
    ("start-", ThemeTokenKind::Spacing),
    ("delay-", ThemeTokenKind::Delay),
    ("gap-x-", ThemeTokenKind::Spacing),
    ("gap-y-", ThemeTokenKind::Spacing),
    ("left-", ThemeTokenKind::Spacing),
    ("size-", ThemeTokenKind::Spacing),
    ("blur-", ThemeTokenKind::Blur),
    ("ease-", ThemeTokenKind::Ease),
    ("font-", ThemeTokenKind::Font),
    ("end-", ThemeTokenKind::Spacing),
    ("gap-", ThemeTokenKind::Spacing),
    ("top-", ThemeTokenKind::Spacing),
    ("px-", ThemeTokenKind::Spacing),
    ("py-", ThemeTokenKind::Spacing),
    ("pt-", ThemeTokenKind::Spacing),
    ("pr-", ThemeTokenKind::Spacing),
    ("pb-", ThemeTokenKind::Spacing),
    ("pl-", ThemeTokenKind::Spacing),
    ("ps-", ThemeTokenKind::Spacing),
    ("pe-", ThemeTokenKind::Spacing),
    ("mx-", ThemeTokenKind::Spacing),
    ("my-", ThemeTokenKind::Spacing),
    ("mt-", ThemeTokenKind::Spacing),
    ("mr-", ThemeTokenKind::Spacing),
    ("mb-", ThemeTokenKind::Spacing),
    ("ml-", ThemeTokenKind::Spacing),
    ("ms-", ThemeTokenKind::Spacing),
    ("me-", ThemeTokenKind::Spacing),
    ("p-", ThemeTokenKind::Spacing),
    ("m-", ThemeTokenKind::Spacing),
    ("w-", ThemeTokenKind::Spacing),
    ("h-", ThemeTokenKind::Spacing),
    ("z-", ThemeTokenKind::ZIndex),
];

/// A bare custom property on these utilities is a color. Only a `length:`
/// hint points them at their own theme kind.
const LENGTH_HINTED_PREFIXES: &[(&str, ThemeTokenKind)] = &[
    ("ring-offset-", ThemeTokenKind::RingOffset),
    ("outline-", ThemeTokenKind::Outline),
    ("border-", ThemeTokenKind::BorderWidth),
    ("ring-", ThemeTokenKind::Ring),
    ("text-", ThemeTokenKind::Text),
];

/// The non-color theme kind a utility draws its custom property from, along
/// with the referenced property. `p-(--spacing-4)` gives spacing,
/// `font-(weight:--x)` font weight and `border-(length:--x)` border width.
pub fn theme_token_for_class(base_class: &str) -> Option<(ThemeTokenKind, String)> {
    if let Some((kind, raw)) = match_kind_prefix(LENGTH_HINTED_PREFIXES, base_class) {
        return match split_type_hint(raw)? {
            (Some("length"), value) => Some((kind, extract_custom_property_token(value)?)),
            _ => None,
        };
    }

    let (kind, raw) = match_kind_prefix(KIND_PREFIXES, base_class)?;
    let (hint, value) = split_type_hint(raw)?;
    let kind = match (kind, hint) {
        (ThemeTokenKind::Font, Some("weight")) => ThemeTokenKind::FontWeight,
        (kind, None | Some("length")) => kind,
        _ => return None,
    };
    Some((kind, extract_custom_property_token(value)?))
}

fn match_kind_prefix<'a>(
    table: &[(&str, ThemeTokenKind)],
    base_class: &'a str,
) -> Option<(ThemeTokenKind, &'a str)> {
    table
        .iter()
        .find_map(|&(prefix, kind)| base_class.strip_prefix(prefix).map(|raw| (kind, raw)))
}

/// Splits `(hint:--x)` / `[hint:var(--x)]` into the hint and the value.
/// Values not wrapped in parentheses or brackets give `None`.
fn split_type_hint(raw: &str) -> Option<(Option<&str>, &str)> {
    let inner = raw
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .or_else(|| raw.strip_prefix('[').and_then(|v| v.strip_suffix(']')))?;
    match inner.split_once(':') {
        Some((hint, value))
            if !hint.is_empty()
                && hint.bytes().all(|b| b.is_ascii_lowercase() || b == b'-') =>
        {
            Some((Some(hint), value))
        }
        _ => Some((None, inner)),
    }
}

/// Light/dark appearance used when reading theme variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariable {
    pub kind: ThemeTokenKind,
    pub light: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

impl ThemeVariable {
    pub fn new(kind: ThemeTokenKind, light: impl Into<String>) -> Self {
        Self {
            kind,
            light: light.into(),
            dark: None,
        }
    }

    pub fn with_dark(mut self, dark: impl Into<String>) -> Self {
        self.dark = Some(dark.into());
        self
    }

    /// The value for `mode`; dark falls back to light when unset.
    pub fn value(&self, mode: ColorMode) -> &str {
        match (mode, self.dark.as_deref()) {
            (ColorMode::Dark, Some(dark)) => dark,
            _ => self.light.as_str(),
        }
    }
}

/// Caller-owned table of theme variables and utility aliases.
///
/// Built once before validation and passed by reference; `clear` resets it
/// between independent runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeVariableRegistry {
    variables: BTreeMap<String, ThemeVariable>,
    aliases: BTreeMap<String, String>,
}

impl ThemeVariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_variable(&mut self, name: impl Into<String>, variable: ThemeVariable) {
        self.variables.insert(name.into(), variable);
    }

    pub fn insert_alias(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.aliases.insert(name.into(), expansion.into());
    }

    pub fn variable(&self, name: &str) -> Option<&ThemeVariable> {
        self.variables.get(name)
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn value_for(&self, name: &str, mode: ColorMode) -> Option<&str> {
        self.variables.get(name).map(|variable| variable.value(mode))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &ThemeVariable)> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.as_str(), variable))
    }

    /// Splits `classes` on whitespace, replacing each alias token with the
    /// utilities it stands for. Expansion is a single textual pass.
    pub fn expand_aliases(&self, classes: &str) -> Vec<String> {
        let mut out = Vec::new();
        for token in classes.split_whitespace() {
            match self.aliases.get(token) {
                Some(expansion) => out.extend(expansion.split_whitespace().map(str::to_string)),
                None => out.push(token.to_string()),
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.aliases.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ColorMode, ThemeTokenKind, ThemeVariable, ThemeVariableRegistry,
        extract_custom_property_token, invalid_color_variable_name, invalid_theme_token_name,
        is_valid_css_property_name, theme_token_for_class,
    };

    #[test]
    fn accepts_namespaced_theme_tokens() {
        assert!(invalid_theme_token_name("--color-brand", ThemeTokenKind::Color).is_none());
        assert!(invalid_theme_token_name("--tw-color-brand", ThemeTokenKind::Color).is_none());
        assert!(invalid_theme_token_name("var(--COLOR-Brand)", ThemeTokenKind::Color).is_none());
        assert!(invalid_theme_token_name("--spacing-4", ThemeTokenKind::Spacing).is_none());
    }

    #[test]
    fn flags_tokens_outside_their_namespace() {
        let issue = invalid_theme_token_name("--brand", ThemeTokenKind::Color)
            .expect("unprefixed color token should be flagged");
        assert_eq!(issue.token, "--brand");
        assert_eq!(issue.kind, ThemeTokenKind::Color);
        assert!(issue.message().contains("--color-"));
        assert!(invalid_theme_token_name("--color-x", ThemeTokenKind::Radius).is_some());
    }

    #[test]
    fn flags_empty_tokens() {
        assert!(invalid_theme_token_name("--", ThemeTokenKind::Color).is_some());
        assert!(invalid_theme_token_name("var()", ThemeTokenKind::Spacing).is_some());
        assert!(invalid_theme_token_name("", ThemeTokenKind::Color).is_some());
    }

    #[test]
    fn extracts_custom_property_forms() {
        assert_eq!(
            extract_custom_property_token("var(--color-brand)").as_deref(),
            Some("--color-brand")
        );
        assert_eq!(
            extract_custom_property_token("(--color-brand)").as_deref(),
            Some("--color-brand")
        );
        assert_eq!(
            extract_custom_property_token("--color-brand").as_deref(),
            Some("--color-brand")
        );
        assert_eq!(
            extract_custom_property_token("var(--x, red)").as_deref(),
            Some("--x")
        );
        assert_eq!(extract_custom_property_token("red-500"), None);
        assert_eq!(extract_custom_property_token("--"), None);
        assert_eq!(extract_custom_property_token("var(red)"), None);
    }

    #[test]
    fn flags_non_color_variables_in_color_utilities() {
        assert_eq!(
            invalid_color_variable_name("bg-(--brand)").as_deref(),
            Some("--brand")
        );
        assert_eq!(
            invalid_color_variable_name("text-[var(--primary)]").as_deref(),
            Some("--primary")
        );
        assert_eq!(
            invalid_color_variable_name("ring-offset-[--accent]/50").as_deref(),
            Some("--accent")
        );
        assert_eq!(invalid_color_variable_name("bg-(--color-brand)"), None);
        assert_eq!(invalid_color_variable_name("bg-var(--tw-color-x)"), None);
        assert_eq!(invalid_color_variable_name("bg-red-500"), None);
        assert_eq!(invalid_color_variable_name("p-(--brand)"), None);
    }

    #[test]
    fn skips_image_bracket_values() {
        assert_eq!(invalid_color_variable_name("bg-[url(--hero)]"), None);
        assert_eq!(invalid_color_variable_name("bg-[image:var(--hero)]"), None);
    }

    #[test]
    fn validates_css_property_names() {
        assert!(is_valid_css_property_name("--my-var"));
        assert!(is_valid_css_property_name("mask-type"));
        assert!(is_valid_css_property_name("-webkit-line-clamp"));
        assert!(!is_valid_css_property_name("--"));
        assert!(!is_valid_css_property_name(""));
        assert!(!is_valid_css_property_name("mask type"));
        assert!(!is_valid_css_property_name("9lives"));
        assert!(!is_valid_css_property_name("color!"));
    }

    #[test]
    fn maps_utilities_to_theme_kinds() {
        assert_eq!(
            theme_token_for_class("p-(--gutter)"),
            Some((ThemeTokenKind::Spacing, "--gutter".to_string()))
        );
        assert_eq!(
            theme_token_for_class("rounded-[var(--radius-card)]"),
            Some((ThemeTokenKind::Radius, "--radius-card".to_string()))
        );
        assert_eq!(
            theme_token_for_class("gap-(length:--space)"),
            Some((ThemeTokenKind::Spacing, "--space".to_string()))
        );
        assert_eq!(theme_token_for_class("p-4"), None);
        assert_eq!(theme_token_for_class("bg-(--brand)"), None);
        assert_eq!(
            theme_token_for_class("ps-(--gap)"),
            Some((ThemeTokenKind::Spacing, "--gap".to_string()))
        );
        assert_eq!(
            theme_token_for_class("inset-x-[var(--edge)]"),
            Some((ThemeTokenKind::Spacing, "--edge".to_string()))
        );
        assert_eq!(
            theme_token_for_class("font-(--font-display)"),
            Some((ThemeTokenKind::Font, "--font-display".to_string()))
        );
        assert_eq!(
            theme_token_for_class("font-(weight:--heavy)"),
            Some((ThemeTokenKind::FontWeight, "--heavy".to_string()))
        );
        assert_eq!(
            theme_token_for_class("border-[length:var(--hairline)]"),
            Some((ThemeTokenKind::BorderWidth, "--hairline".to_string()))
        );
        assert_eq!(theme_token_for_class("text-(--color-ink)"), None);
        assert_eq!(theme_token_for_class("ring-offset-(--color-ink)"), None);
        assert_eq!(theme_token_for_class("shadow-(color:--ink)"), None);
    }

    #[test]
    fn registry_reads_mode_specific_values() {
        let mut registry = ThemeVariableRegistry::new();
        registry.insert_variable(
            "--color-surface",
            ThemeVariable::new(ThemeTokenKind::Color, "#ffffff").with_dark("#000000"),
        );
        registry.insert_variable(
            "--color-brand",
            ThemeVariable::new(ThemeTokenKind::Color, "blue-500"),
        );

        assert_eq!(
            registry.value_for("--color-surface", ColorMode::Light),
            Some("#ffffff")
        );
        assert_eq!(
            registry.value_for("--color-surface", ColorMode::Dark),
            Some("#000000")
        );
        assert_eq!(
            registry.value_for("--color-brand", ColorMode::Dark),
            Some("blue-500")
        );
        assert_eq!(registry.value_for("--color-missing", ColorMode::Light), None);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn expands_aliases_once() {
        let mut registry = ThemeVariableRegistry::new();
        registry.insert_alias("card", "p-4 rounded-lg card");
        assert_eq!(
            registry.expand_aliases("card  dark:bg-black"),
            vec!["p-4", "rounded-lg", "card", "dark:bg-black"]
        );
    }
}
