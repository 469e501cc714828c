//! Turns the value part of a color utility into a concrete color.
//!
//! Lookup order for the value after the utility prefix:
//! custom property, bracketed arbitrary value, keyword, semantic theme token
//! (`--color-<value>`), palette shade.

use crate::color::{Oklch, Rgba};
use crate::palette::palette_token;
use crate::scope::split_alpha_suffix;
use crate::theme::{
    ColorMode, ThemeTokenKind, ThemeVariableRegistry, color_value_custom_property,
    extract_custom_property_token, invalid_theme_token_name,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Variable indirections followed before giving up; cycles end here.
const MAX_VARIABLE_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedColor {
    pub color: Rgba,
    /// Multiplier from a `/<alpha>` suffix.
    pub opacity: Option<f64>,
}

impl ResolvedColor {
    /// The color with the opacity multiplier applied.
    pub fn rgba(&self) -> Rgba {
        match self.opacity {
            Some(opacity) => self.color.multiply_alpha(opacity),
            None => self.color,
        }
    }

    pub fn to_hex(&self) -> String {
        self.rgba().to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorResolution {
    Color(ResolvedColor),
    /// `current` / `inherit`: keep whatever color the target already has.
    NoOverride,
    Unresolved,
}

impl ColorResolution {
    pub fn color(self) -> Option<ResolvedColor> {
        match self {
            ColorResolution::Color(color) => Some(color),
            ColorResolution::NoOverride | ColorResolution::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorValue {
    Rgba(Rgba),
    NoOverride,
}

/// Resolves `token` (e.g. `bg-red-500/50`) after stripping `prefix`.
///
/// Custom properties are read from `variables` first and then from
/// `registry`, using `mode` for light/dark values.
pub fn resolve_color(
    token: &str,
    prefix: &str,
    variables: &BTreeMap<String, String>,
    registry: &ThemeVariableRegistry,
    mode: ColorMode,
) -> Option<ResolvedColor> {
    classify_color(token, prefix, variables, registry, mode).color()
}

pub fn classify_color(
    token: &str,
    prefix: &str,
    variables: &BTreeMap<String, String>,
    registry: &ThemeVariableRegistry,
    mode: ColorMode,
) -> ColorResolution {
    let Some(raw) = token.strip_prefix(prefix) else {
        return ColorResolution::Unresolved;
    };
    let (value, alpha_raw) = split_alpha_suffix(raw);
    let opacity = match alpha_raw {
        Some(alpha_raw) => match parse_alpha(alpha_raw) {
            Some(opacity) => Some(opacity),
            None => {
                tracing::trace!(token, alpha = alpha_raw, "invalid alpha suffix");
                return ColorResolution::Unresolved;
            }
        },
        None => None,
    };

    let lookup = Lookup {
        variables,
        registry,
        mode,
    };
    match lookup.resolve_value(value, 0) {
        Some(ColorValue::Rgba(color)) => ColorResolution::Color(ResolvedColor { color, opacity }),
        Some(ColorValue::NoOverride) => ColorResolution::NoOverride,
        None => {
            tracing::trace!(token, "color value did not resolve");
            ColorResolution::Unresolved
        }
    }
}

/// Parses an alpha modifier: `50`, `50%`, `0.5` or `[0.5]`.
///
/// Values above 1 are percentages. The result is clamped to `[0, 1]`.
pub fn parse_alpha(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('[')
        .and_then(|value| value.strip_suffix(']'))
        .unwrap_or(raw);
    let (number, percent) = match inner.strip_suffix('%') {
        Some(number) => (number, true),
        None => (inner, false),
    };
    let value = parse_float(number)?;
    let value = if percent || value > 1.0 {
        value / 100.0
    } else {
        value
    };
    Some(value.clamp(0.0, 1.0))
}

/// Parses `oklch(L C H[ / A])`. Underscores count as spaces.
///
/// `L` and `A` accept `%`, `H` accepts `deg`. Anything missing or malformed
/// fails the whole value.
pub fn parse_oklch(raw: &str) -> Option<Oklch> {
    let normalized = raw.trim().replace('_', " ").to_ascii_lowercase();
    let body = normalized
        .strip_prefix("oklch(")?
        .strip_suffix(')')?
        .replace('/', " / ");
    let parts = body.split_whitespace().collect::<Vec<_>>();

    let (channels, alpha) = match parts.iter().position(|part| *part == "/") {
        Some(idx) => (&parts[..idx], Some(&parts[idx + 1..])),
        None => (&parts[..], None),
    };
    let [l, c, h] = channels else {
        return None;
    };

    let l = parse_percent_or_float(l)?;
    let c = parse_float(c)?;
    let h = parse_float(h.strip_suffix("deg").unwrap_or(h))?;
    let alpha = match alpha {
        Some([alpha]) => parse_percent_or_float(alpha)?,
        Some(_) => return None,
        None => 1.0,
    };

    Some(Oklch::new(l, c, h, alpha))
}

fn parse_percent_or_float(raw: &str) -> Option<f64> {
    match raw.strip_suffix('%') {
        Some(number) => parse_float(number).map(|value| value / 100.0),
        None => parse_float(raw),
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

struct Lookup<'a> {
    variables: &'a BTreeMap<String, String>,
    registry: &'a ThemeVariableRegistry,
    mode: ColorMode,
}

impl Lookup<'_> {
    fn resolve_value(&self, value: &str, depth: usize) -> Option<ColorValue> {
        if value.is_empty() {
            return None;
        }

        if value.starts_with('(') || value.starts_with("var(") {
            let name = color_value_custom_property(value)?;
            return self.resolve_reference(&name, depth);
        }
        if value.starts_with("--") {
            let name = extract_custom_property_token(value)?;
            return self.resolve_reference(&name, depth);
        }

        if let Some(inner) = value
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
        {
            return self.resolve_arbitrary(inner, depth);
        }

        match value {
            "white" => return Some(ColorValue::Rgba(Rgba::WHITE)),
            "black" => return Some(ColorValue::Rgba(Rgba::BLACK)),
            "transparent" => return Some(ColorValue::Rgba(Rgba::TRANSPARENT)),
            "current" | "inherit" => return Some(ColorValue::NoOverride),
            _ => {}
        }

        let theme_name = format!("--color-{}", value);
        if let Some(resolved) = self.lookup_registry(&theme_name, depth) {
            return Some(resolved);
        }

        palette_token(value).map(ColorValue::Rgba)
    }

    fn resolve_arbitrary(&self, inner: &str, depth: usize) -> Option<ColorValue> {
        let inner = inner.trim();
        let inner = inner.strip_prefix("color:").unwrap_or(inner);
        if inner.starts_with("var(") || inner.starts_with("--") {
            let name = extract_custom_property_token(inner)?;
            return self.resolve_reference(&name, depth);
        }
        if let Some(oklch) = parse_oklch(inner) {
            return Some(ColorValue::Rgba(oklch.to_srgb()));
        }
        Rgba::from_hex(inner).map(ColorValue::Rgba)
    }

    /// A custom property named by the class itself must be color-namespaced.
    fn resolve_reference(&self, name: &str, depth: usize) -> Option<ColorValue> {
        if invalid_theme_token_name(name, ThemeTokenKind::Color).is_some() {
            return None;
        }
        self.lookup_variable(name, depth)
    }

    fn lookup_variable(&self, name: &str, depth: usize) -> Option<ColorValue> {
        if depth >= MAX_VARIABLE_DEPTH {
            return None;
        }
        if let Some(value) = self.variables.get(name) {
            return self.resolve_literal(value, depth + 1);
        }
        self.lookup_registry(name, depth)
    }

    fn lookup_registry(&self, name: &str, depth: usize) -> Option<ColorValue> {
        if depth >= MAX_VARIABLE_DEPTH {
            return None;
        }
        let value = self.registry.value_for(name, self.mode)?;
        self.resolve_literal(value, depth + 1)
    }

    /// A variable's stored value: hex, `oklch(...)`, keyword, palette token,
    /// theme token name or another `var(...)`.
    fn resolve_literal(&self, raw: &str, depth: usize) -> Option<ColorValue> {
        let raw = raw.trim();
        if is_custom_property_form(raw) {
            let name = extract_custom_property_token(raw)?;
            return self.lookup_variable(&name, depth);
        }
        if raw.starts_with('#') {
            return Rgba::from_hex(raw).map(ColorValue::Rgba);
        }
        if raw.to_ascii_lowercase().starts_with("oklch(") {
            return parse_oklch(raw).map(|oklch| ColorValue::Rgba(oklch.to_srgb()));
        }
        self.resolve_value(raw, depth)
    }
}

fn is_custom_property_form(value: &str) -> bool {
    value.starts_with("var(") || value.starts_with('(') || value.starts_with("--")
}
