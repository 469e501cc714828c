//! Conflict groups: utilities in the same group and scope override each other.

use crate::scope::parse_variant_class;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConflictGroupKey {
    pub scope: String,
    pub group: &'static str,
}

impl ConflictGroupKey {
    /// Key for a full class, or `None` when its base has no conflict group.
    pub fn for_class(class: &str) -> Option<(Self, &str)> {
        let parsed = parse_variant_class(class);
        let group = conflict_group(parsed.base)?;
        Some((
            Self {
                scope: parsed.scope(),
                group,
            },
            parsed.base,
        ))
    }
}

/// Two different classes that set the same property in the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConflict {
    pub previous: String,
    pub current: String,
    pub scope: String,
}

/// The same class repeated within one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateStyle {
    pub token: String,
    pub scope: String,
}

const TEXT_NON_COLOR_TOKENS: &[&str] = &[
    "left", "center", "right", "justify", "start", "end", "wrap", "nowrap", "balance", "pretty",
    "ellipsis", "clip", "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl",
    "8xl", "9xl",
];

const BG_NON_COLOR_PREFIXES: &[&str] = &[
    "gradient-", "linear-", "radial-", "conic-", "clip-", "origin-", "blend-", "size-",
    "position-", "repeat", "no-repeat", "[url(", "[image:", "url(", "none", "fixed", "local",
    "scroll", "auto", "cover", "contain", "center", "top", "bottom", "left", "right",
];

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];

const OUTLINE_STYLES: &[&str] = &["none", "hidden", "solid", "dashed", "dotted", "double"];

// (side token, width group, style group, color group)
const BORDER_SIDES: &[(&str, &str, &str, &str)] = &[
    ("x", "border-width-x", "border-style-x", "border-color-x"),
    ("y", "border-width-y", "border-style-y", "border-color-y"),
    ("t", "border-width-top", "border-style-top", "border-color-top"),
    ("r", "border-width-right", "border-style-right", "border-color-right"),
    ("b", "border-width-bottom", "border-style-bottom", "border-color-bottom"),
    ("l", "border-width-left", "border-style-left", "border-color-left"),
    ("s", "border-width-start", "border-style-start", "border-color-start"),
    ("e", "border-width-end", "border-style-end", "border-color-end"),
];

const BORDER_ALL: (&str, &str, &str, &str) = (
    "",
    "border-width-all",
    "border-style-all",
    "border-color-all",
);

// Axis utilities keep their own groups rather than folding into the sides
// they cover, so `px-4 pl-2` is not a conflict. Logical sides share the
// physical group of the same edge.
const PADDING_GROUPS: &[(&str, &str)] = &[
    ("p-", "padding-all"),
    ("px-", "padding-x"),
    ("py-", "padding-y"),
    ("pt-", "padding-top"),
    ("pr-", "padding-right"),
    ("pe-", "padding-right"),
    ("pb-", "padding-bottom"),
    ("pl-", "padding-left"),
    ("ps-", "padding-left"),
];

/// Semantic group of a base utility; `None` means it can never conflict.
pub fn conflict_group(base: &str) -> Option<&'static str> {
    if base.is_empty() {
        return None;
    }

    if let Some(raw) = base.strip_prefix("bg-") {
        return background_group(raw);
    }
    if let Some(raw) = base.strip_prefix("text-") {
        return text_group(raw);
    }
    if base == "rounded" || base.starts_with("rounded-") {
        return Some("rounded");
    }
    if let Some(group) = PADDING_GROUPS
        .iter()
        .find(|(prefix, _)| base.len() > prefix.len() && base.starts_with(prefix))
        .map(|(_, group)| *group)
    {
        return Some(group);
    }
    if base == "border" || base.starts_with("border-") {
        return border_group(base);
    }
    if base == "ring" || base.starts_with("ring-") {
        return ring_group(base);
    }
    if base == "outline" || base.starts_with("outline-") {
        return outline_group(base);
    }
    if base == "shadow"
        || base.starts_with("shadow-")
        || base == "drop-shadow"
        || base.starts_with("drop-shadow-")
    {
        return Some("shadow");
    }
    if base.len() > "opacity-".len() && base.starts_with("opacity-") {
        return Some("opacity");
    }

    None
}

fn background_group(raw: &str) -> Option<&'static str> {
    if raw.is_empty()
        || BG_NON_COLOR_PREFIXES
            .iter()
            .any(|prefix| raw.starts_with(prefix))
    {
        return None;
    }
    Some("background-color")
}

fn text_group(raw: &str) -> Option<&'static str> {
    let (value, _) = crate::scope::split_alpha_suffix(raw);
    if value.is_empty()
        || TEXT_NON_COLOR_TOKENS.contains(&value)
        || value.starts_with("shadow")
        || is_length_value(value)
    {
        return None;
    }
    Some("text-color")
}

fn border_group(base: &str) -> Option<&'static str> {
    if base.starts_with("border-spacing")
        || base == "border-collapse"
        || base == "border-separate"
    {
        return None;
    }
    if base == "border" {
        return Some(BORDER_ALL.1);
    }
    let rest = base.strip_prefix("border-")?;

    for &(side, width, style, color) in BORDER_SIDES {
        if rest == side {
            return Some(width);
        }
        if let Some(value) = rest
            .strip_prefix(side)
            .and_then(|value| value.strip_prefix('-'))
        {
            return Some(border_value_group(value, width, style, color));
        }
    }

    let (_, width, style, color) = BORDER_ALL;
    Some(border_value_group(rest, width, style, color))
}

fn border_value_group(
    value: &str,
    width: &'static str,
    style: &'static str,
    color: &'static str,
) -> &'static str {
    if is_width_value(value) {
        width
    } else if BORDER_STYLES.contains(&value) {
        style
    } else {
        color
    }
}

fn ring_group(base: &str) -> Option<&'static str> {
    match base {
        "ring" => return Some("ring-width"),
        "ring-inset" => return Some("ring-inset"),
        _ => {}
    }
    if let Some(value) = base.strip_prefix("ring-offset-") {
        return Some(if is_width_value(value) {
            "ring-offset-width"
        } else {
            "ring-offset-color"
        });
    }
    let value = base.strip_prefix("ring-")?;
    Some(if is_width_value(value) {
        "ring-width"
    } else {
        "ring-color"
    })
}

fn outline_group(base: &str) -> Option<&'static str> {
    if base == "outline" {
        return Some("outline-width");
    }
    if base.starts_with("outline-offset-") {
        return Some("outline-offset");
    }
    let value = base.strip_prefix("outline-")?;
    if OUTLINE_STYLES.contains(&value) {
        Some("outline-style")
    } else if is_width_value(value) {
        Some("outline-width")
    } else {
        Some("outline-color")
    }
}

/// A numeric token, the literal `px`, or a bracketed/typed length.
fn is_width_value(value: &str) -> bool {
    if value == "px" {
        return true;
    }
    if !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit()) {
        return true;
    }
    is_length_value(value)
}

fn is_length_value(value: &str) -> bool {
    if value.starts_with("(length:") || value.starts_with("[length:") {
        return true;
    }
    value
        .strip_prefix('[')
        .and_then(|inner| inner.chars().next())
        .is_some_and(|first| first.is_ascii_digit() || first == '.')
}

/// Pairs every class with the first class recorded for its scope and group.
///
/// The first occurrence stays the anchor: a third differing class is reported
/// against the first one, not the second.
pub fn detect_conflicts<S: AsRef<str>>(classes: &[S]) -> Vec<StyleConflict> {
    let mut first_seen = BTreeMap::<ConflictGroupKey, &str>::new();
    let mut conflicts = Vec::new();

    for class in classes {
        let class = class.as_ref();
        let Some((key, base)) = ConflictGroupKey::for_class(class) else {
            continue;
        };
        match first_seen.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(base);
            }
            Entry::Occupied(entry) => {
                if *entry.get() != base {
                    conflicts.push(StyleConflict {
                        previous: entry.get().to_string(),
                        current: base.to_string(),
                        scope: entry.key().scope.clone(),
                    });
                }
            }
        }
    }

    conflicts
}

/// Reports each repeat of a grouped class within the same scope.
pub fn detect_duplicates<S: AsRef<str>>(classes: &[S]) -> Vec<DuplicateStyle> {
    let mut first_seen = BTreeMap::<ConflictGroupKey, &str>::new();
    let mut duplicates = Vec::new();

    for class in classes {
        let class = class.as_ref();
        let Some((key, base)) = ConflictGroupKey::for_class(class) else {
            continue;
        };
        match first_seen.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(base);
            }
            Entry::Occupied(entry) => {
                if *entry.get() == base {
                    duplicates.push(DuplicateStyle {
                        token: base.to_string(),
                        scope: entry.key().scope.clone(),
                    });
                }
            }
        }
    }

    duplicates
}

/// True when `incoming` overrides something `previous` already set for the
/// same target: same scope and group, different class.
pub fn has_cross_scope_conflicts<S: AsRef<str>, T: AsRef<str>>(
    previous: &[S],
    incoming: &[T],
) -> bool {
    let mut first_seen = BTreeMap::<ConflictGroupKey, &str>::new();
    for class in previous {
        if let Some((key, base)) = ConflictGroupKey::for_class(class.as_ref()) {
            first_seen.entry(key).or_insert(base);
        }
    }

    incoming.iter().any(|class| {
        ConflictGroupKey::for_class(class.as_ref())
            .is_some_and(|(key, base)| first_seen.get(&key).is_some_and(|seen| *seen != base))
    })
}

/// Like [`has_cross_scope_conflicts`] but returns every overriding pair.
pub fn cross_scope_conflicts<S: AsRef<str>, T: AsRef<str>>(
    previous: &[S],
    incoming: &[T],
) -> Vec<StyleConflict> {
    let mut first_seen = BTreeMap::<ConflictGroupKey, &str>::new();
    for class in previous {
        if let Some((key, base)) = ConflictGroupKey::for_class(class.as_ref()) {
            first_seen.entry(key).or_insert(base);
        }
    }

    incoming
        .iter()
        .filter_map(|class| {
            let (key, base) = ConflictGroupKey::for_class(class.as_ref())?;
            let seen = first_seen.get(&key)?;
            (*seen != base).then(|| StyleConflict {
                previous: seen.to_string(),
                current: base.to_string(),
                scope: key.scope,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        StyleConflict, conflict_group, cross_scope_conflicts, detect_conflicts,
        detect_duplicates, has_cross_scope_conflicts,
    };

    #[test]
    fn groups_border_utilities_by_width_style_color() {
        assert_eq!(conflict_group("border"), Some("border-width-all"));
        assert_eq!(conflict_group("border-2"), Some("border-width-all"));
        assert_eq!(conflict_group("border-px"), Some("border-width-all"));
        assert_eq!(conflict_group("border-[3px]"), Some("border-width-all"));
        assert_eq!(conflict_group("border-blue-500"), Some("border-color-all"));
        assert_eq!(conflict_group("border-dashed"), Some("border-style-all"));
        assert_eq!(conflict_group("border-t"), Some("border-width-top"));
        assert_eq!(conflict_group("border-t-4"), Some("border-width-top"));
        assert_eq!(conflict_group("border-x-red-500"), Some("border-color-x"));
        assert_eq!(conflict_group("border-spacing-2"), None);
    }

    #[test]
    fn separates_text_color_from_other_text_utilities() {
        assert_eq!(conflict_group("text-red-500"), Some("text-color"));
        assert_eq!(conflict_group("text-white/80"), Some("text-color"));
        assert_eq!(conflict_group("text-(--color-ink)"), Some("text-color"));
        assert_eq!(conflict_group("text-center"), None);
        assert_eq!(conflict_group("text-lg"), None);
        assert_eq!(conflict_group("text-nowrap"), None);
        assert_eq!(conflict_group("text-[14px]"), None);
    }

    #[test]
    fn groups_remaining_families() {
        assert_eq!(conflict_group("bg-red-500"), Some("background-color"));
        assert_eq!(conflict_group("bg-cover"), None);
        assert_eq!(conflict_group("bg-linear-to-r"), None);
        assert_eq!(conflict_group("rounded-t-lg"), Some("rounded"));
        assert_eq!(conflict_group("p-4"), Some("padding-all"));
        assert_eq!(conflict_group("pt-2"), Some("padding-top"));
        assert_eq!(conflict_group("ps-2"), Some("padding-left"));
        assert_eq!(conflict_group("ring"), Some("ring-width"));
        assert_eq!(conflict_group("ring-2"), Some("ring-width"));
        assert_eq!(conflict_group("ring-blue-500"), Some("ring-color"));
        assert_eq!(conflict_group("ring-inset"), Some("ring-inset"));
        assert_eq!(conflict_group("ring-offset-2"), Some("ring-offset-width"));
        assert_eq!(conflict_group("ring-offset-white"), Some("ring-offset-color"));
        assert_eq!(conflict_group("outline-none"), Some("outline-style"));
        assert_eq!(conflict_group("outline-2"), Some("outline-width"));
        assert_eq!(conflict_group("outline-offset-2"), Some("outline-offset"));
        assert_eq!(conflict_group("outline-red-500"), Some("outline-color"));
        assert_eq!(conflict_group("drop-shadow-md"), Some("shadow"));
        assert_eq!(conflict_group("shadow"), Some("shadow"));
        assert_eq!(conflict_group("opacity-50"), Some("opacity"));
        assert_eq!(conflict_group("flex"), None);
    }

    #[test]
    fn detects_conflicts_in_one_list() {
        let conflicts = detect_conflicts(&["p-4", "p-2", "bg-red-500", "bg-blue-500"]);
        assert_eq!(
            conflicts,
            vec![
                StyleConflict {
                    previous: "p-4".to_string(),
                    current: "p-2".to_string(),
                    scope: String::new(),
                },
                StyleConflict {
                    previous: "bg-red-500".to_string(),
                    current: "bg-blue-500".to_string(),
                    scope: String::new(),
                },
            ]
        );
    }

    #[test]
    fn keeps_padding_axes_apart_from_sides() {
        assert!(detect_conflicts(&["px-4", "pl-2", "py-1", "pt-3"]).is_empty());
        assert_eq!(conflict_group("pe-2"), conflict_group("pr-4"));
        let conflicts = detect_conflicts(&["pl-2", "ps-4"]);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn anchors_on_first_occurrence() {
        let conflicts = detect_conflicts(&["p-4", "p-2", "p-8", "p-4"]);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].previous, "p-4");
        assert_eq!(conflicts[0].current, "p-2");
        assert_eq!(conflicts[1].previous, "p-4");
        assert_eq!(conflicts[1].current, "p-8");
    }

    #[test]
    fn keeps_scopes_apart() {
        assert!(detect_conflicts(&["bg-white", "dark:bg-black", "hover:bg-gray-100"]).is_empty());
        let conflicts = detect_conflicts(&["dark:bg-white", "dark:bg-black"]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].scope, "dark");
    }

    #[test]
    fn reports_duplicates_separately() {
        assert!(detect_conflicts(&["p-4", "p-4"]).is_empty());
        let duplicates = detect_duplicates(&["p-4", "md:p-4", "p-4"]);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].token, "p-4");
        assert_eq!(duplicates[0].scope, "");
    }

    #[test]
    fn detects_cross_call_overrides() {
        assert!(has_cross_scope_conflicts(
            &["dark:bg-red-500", "p-4"],
            &["dark:bg-blue-500", "p-2"]
        ));
        assert!(!has_cross_scope_conflicts(
            &["dark:bg-red-500", "p-4"],
            &["bg-blue-500", "p-4", "m-2"]
        ));
        let pairs = cross_scope_conflicts(&["dark:bg-red-500", "p-4"], &["dark:bg-blue-500", "p-2"]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].scope, "dark");
    }
}
