//! Variant scope splitting for a single utility class.
//!
//! A class such as `dark:hover:bg-red-500` is a chain of variant prefixes
//! followed by a base utility. Separators inside `[...]` or `(...)` are
//! literal content, so `bg-[url(data:image/svg+xml;foo)]` stays intact.

/// A utility class split into its variant chain and base utility.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedClass<'a> {
    pub variants: Vec<&'a str>,
    pub base: &'a str,
}

impl<'a> ParsedClass<'a> {
    /// Variants joined with `:`, or an empty string for an unscoped class.
    pub fn scope(&self) -> String {
        self.variants.join(":")
    }

    /// Rebuilds the class exactly as it was written.
    pub fn reconstruct(&self) -> String {
        if self.variants.is_empty() {
            return self.base.to_string();
        }
        format!("{}:{}", self.variants.join(":"), self.base)
    }
}

/// Splits on every `:` that sits outside brackets and parentheses.
///
/// The trailing segment is always emitted, so `"dark:"` yields
/// `["dark", ""]` and the empty string yields `[""]`.
pub fn split_scopes(input: &str) -> Vec<&str> {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut segments = Vec::new();
    let mut start = 0usize;

    for (idx, ch) in input.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            ':' if paren_depth == 0 && bracket_depth == 0 => {
                segments.push(&input[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    segments.push(&input[start..]);
    segments
}

pub fn parse_variant_class(input: &str) -> ParsedClass<'_> {
    let mut segments = split_scopes(input);
    if segments.len() == 1 {
        return ParsedClass {
            variants: Vec::new(),
            base: input,
        };
    }
    let base = segments.pop().unwrap_or_default();
    ParsedClass {
        variants: segments,
        base,
    }
}

/// Splits a trailing `/<modifier>` off a utility value.
///
/// Only the last top-level `/` counts: slashes inside `[...]` or `(...)`
/// belong to the value, so `[oklch(0_0_0_/_0.5)]/50` splits at the final
/// slash and `[color/50]` does not split at all.
pub fn split_alpha_suffix(raw: &str) -> (&str, Option<&str>) {
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut split_at = None;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '/' if bracket_depth == 0 && paren_depth == 0 => split_at = Some(idx),
            _ => {}
        }
    }

    match split_at {
        Some(idx) => (&raw[..idx], Some(&raw[idx + 1..])),
        None => (raw, None),
    }
}

/// True when every `[` has a matching `]` and there is at least one pair.
pub fn has_balanced_brackets(raw: &str) -> bool {
    let mut depth = 0usize;
    let mut seen_pair = false;
    for ch in raw.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                seen_pair = true;
            }
            _ => {}
        }
    }
    depth == 0 && seen_pair
}

#[cfg(test)]
mod tests {
    use super::{has_balanced_brackets, parse_variant_class, split_alpha_suffix, split_scopes};
    use proptest::prelude::*;

    #[test]
    fn splits_on_top_level_colons() {
        assert_eq!(
            split_scopes("dark:hover:bg-red-500"),
            vec!["dark", "hover", "bg-red-500"]
        );
    }

    #[test]
    fn keeps_colons_inside_brackets_and_parens() {
        assert_eq!(
            split_scopes("dark:bg-[url(data:image/svg+xml;foo)]"),
            vec!["dark", "bg-[url(data:image/svg+xml;foo)]"]
        );
        assert_eq!(
            split_scopes("[&:hover]:text-(--color-brand)"),
            vec!["[&:hover]", "text-(--color-brand)"]
        );
    }

    #[test]
    fn emits_empty_trailing_segment() {
        assert_eq!(split_scopes("dark:"), vec!["dark", ""]);
        assert_eq!(split_scopes(""), vec![""]);
        assert_eq!(split_scopes("a::b"), vec!["a", "", "b"]);
    }

    #[test]
    fn parses_variant_chain_and_base() {
        let parsed = parse_variant_class("dark:hover:bg-red-500");
        assert_eq!(parsed.variants, vec!["dark", "hover"]);
        assert_eq!(parsed.base, "bg-red-500");
        assert_eq!(parsed.scope(), "dark:hover");
    }

    #[test]
    fn unscoped_class_has_no_variants() {
        let parsed = parse_variant_class("p-4");
        assert!(parsed.variants.is_empty());
        assert_eq!(parsed.base, "p-4");
        assert_eq!(parsed.scope(), "");
    }

    #[test]
    fn splits_last_top_level_slash() {
        assert_eq!(split_alpha_suffix("red-500/50"), ("red-500", Some("50")));
        assert_eq!(
            split_alpha_suffix("[oklch(0_0_0)]/50"),
            ("[oklch(0_0_0)]", Some("50"))
        );
        assert_eq!(split_alpha_suffix("[color/50]"), ("[color/50]", None));
        assert_eq!(split_alpha_suffix("a/b/c"), ("a/b", Some("c")));
        assert_eq!(split_alpha_suffix("red-500/"), ("red-500", Some("")));
    }

    #[test]
    fn detects_balanced_brackets() {
        assert!(has_balanced_brackets("w-[10px]"));
        assert!(has_balanced_brackets("grid-cols-[repeat(2,[a]_1fr)]"));
        assert!(!has_balanced_brackets("w-[10px"));
        assert!(!has_balanced_brackets("w-10px]"));
        assert!(!has_balanced_brackets("w-10"));
    }

    proptest! {
        #[test]
        fn reconstructs_balanced_input(
            variants in prop::collection::vec("[a-z0-9-]{1,8}", 0..4),
            base in "[a-z]{1,6}-\\[[a-z:/()_]{0,12}\\]",
        ) {
            let input = if variants.is_empty() {
                base.clone()
            } else {
                format!("{}:{}", variants.join(":"), base)
            };
            let parsed = parse_variant_class(&input);
            prop_assert_eq!(parsed.reconstruct(), input.as_str());
            prop_assert_eq!(parsed.base, base.as_str());
            prop_assert_eq!(parsed.variants.len(), variants.len());
        }
    }
}
