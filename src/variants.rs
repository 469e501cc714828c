use crate::scope::parse_variant_class;

const STATE_VARIANTS: &[&str] = &["dark", "light", "focus", "hover", "active", "disabled"];

const GROUP_VARIANTS: &[&str] = &[
    "group-hover",
    "group-focus",
    "group-active",
    "group-disabled",
];

const BREAKPOINT_VARIANTS: &[&str] = &["sm", "md", "lg", "xl", "2xl"];

const PLATFORM_VARIANTS: &[&str] = &["ios", "macos", "tvos", "watchos", "visionos"];

/// States a `peer-<state>` variant may observe.
const PEER_STATES: &[&str] = &["focus", "hover", "active", "disabled"];

/// Variant prefixes of `class` that the engine does not support, in order.
pub fn unsupported_variants(class: &str) -> Vec<String> {
    parse_variant_class(class)
        .variants
        .into_iter()
        .filter(|variant| !is_supported_variant(variant))
        .map(str::to_string)
        .collect()
}

pub fn is_supported_variant(variant: &str) -> bool {
    STATE_VARIANTS.contains(&variant)
        || GROUP_VARIANTS.contains(&variant)
        || BREAKPOINT_VARIANTS.contains(&variant)
        || PLATFORM_VARIANTS.contains(&variant)
        || is_peer_variant(variant)
}

/// Matches `peer-<state>` and `peer-<state>/<id>` with a non-empty id.
fn is_peer_variant(variant: &str) -> bool {
    let Some(raw) = variant.strip_prefix("peer-") else {
        return false;
    };
    let (state, id) = match raw.split_once('/') {
        Some((state, id)) => (state, Some(id)),
        None => (raw, None),
    };
    if !PEER_STATES.contains(&state) {
        return false;
    }
    id.is_none_or(|id| !id.is_empty())
}
