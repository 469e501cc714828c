//! Static classification tables for base utilities.

use crate::scope::has_balanced_brackets;

const VALID_EXACT: &[&str] = &[
    // display
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "block",
    "inline-block",
    "inline",
    "hidden",
    "contents",
    "flow-root",
    "container",
    // position
    "static",
    "relative",
    "absolute",
    "fixed",
    "sticky",
    // flexbox
    "flex-row",
    "flex-row-reverse",
    "flex-col",
    "flex-col-reverse",
    "flex-wrap",
    "flex-wrap-reverse",
    "flex-nowrap",
    "flex-1",
    "flex-auto",
    "flex-initial",
    "flex-none",
    "grow",
    "shrink",
    // typography
    "italic",
    "not-italic",
    "underline",
    "overline",
    "line-through",
    "no-underline",
    "uppercase",
    "lowercase",
    "capitalize",
    "normal-case",
    "truncate",
    "antialiased",
    "subpixel-antialiased",
    // visibility
    "visible",
    "invisible",
    // effects
    "rounded",
    "border",
    "shadow",
    "ring",
    "ring-inset",
    "outline",
    "drop-shadow",
    "blur",
    "grayscale",
    "invert",
    "sepia",
    "transition",
    "transform",
    "isolate",
    "isolation-auto",
    "sr-only",
    "not-sr-only",
];

const VALID_PREFIXES: &[&str] = &[
    // spacing
    "p-", "px-", "py-", "pt-", "pr-", "pb-", "pl-", "ps-", "pe-", "m-", "mx-", "my-", "mt-", "mr-",
    "mb-", "ml-", "ms-", "me-", "gap-", "space-x-", "space-y-",
    // sizing
    "w-", "h-", "size-", "min-w-", "max-w-", "min-h-", "max-h-", "aspect-", "basis-",
    // layout
    "inset-", "top-", "right-", "bottom-", "left-", "start-", "end-", "z-", "overflow-",
    "object-", "order-", "grow-", "shrink-", "flex-", "items-", "justify-", "self-", "content-",
    "place-", "grid-cols-", "grid-rows-", "grid-flow-", "col-", "row-", "auto-cols-",
    "auto-rows-", "columns-", "float-", "clear-",
    // typography
    "text-", "font-", "leading-", "tracking-", "line-clamp-", "whitespace-", "break-",
    "decoration-", "underline-offset-", "indent-", "align-", "list-", "placeholder-",
    // backgrounds and borders
    "bg-", "from-", "via-", "to-", "rounded-", "border-", "divide-", "outline-", "ring-",
    "ring-offset-",
    // effects and filters
    "shadow-", "drop-shadow-", "opacity-", "blur-", "brightness-", "contrast-", "grayscale-",
    "hue-rotate-", "invert-", "saturate-", "sepia-", "backdrop-", "mix-blend-",
    // transforms and motion
    "scale-", "rotate-", "translate-x-", "translate-y-", "skew-x-", "skew-y-", "origin-",
    "transition-", "duration-", "delay-", "ease-", "animate-",
    // interactivity and svg
    "cursor-", "pointer-events-", "select-", "resize-", "scroll-", "touch-", "accent-",
    "caret-", "fill-", "stroke-", "will-change-",
];

/// Utilities that need a table layout primitive the target surface lacks.
const TABLE_LAYOUT_EXACT: &[&str] = &[
    "table",
    "inline-table",
    "table-caption",
    "table-cell",
    "table-column",
    "table-column-group",
    "table-footer-group",
    "table-header-group",
    "table-row-group",
    "table-row",
    "table-auto",
    "table-fixed",
    "border-collapse",
    "border-separate",
    "caption-top",
    "caption-bottom",
];

const TABLE_LAYOUT_PREFIXES: &[&str] = &["border-spacing-", "table-"];

const LAYOUT_EXACT: &[&str] = &[
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "flex-row",
    "flex-row-reverse",
    "flex-col",
    "flex-col-reverse",
    "flex-wrap",
    "flex-wrap-reverse",
    "flex-nowrap",
];

const LAYOUT_PREFIXES: &[&str] = &[
    "gap-",
    "space-x-",
    "space-y-",
    "items-",
    "justify-",
    "content-",
    "place-content-",
    "place-items-",
    "grid-cols-",
    "grid-rows-",
    "grid-flow-",
    "auto-cols-",
    "auto-rows-",
    "divide-",
];

/// Accepts a base utility (variants already stripped).
///
/// An arbitrary `[...]` value is accepted as-is. Table layout utilities are
/// rejected even where a generic prefix such as `border-` would match.
pub fn is_valid_class(base: &str) -> bool {
    if has_balanced_brackets(base) {
        return true;
    }
    if is_table_layout_class(base) {
        return false;
    }

    let unsigned = strip_negative(base);
    if VALID_EXACT.contains(&unsigned) {
        return true;
    }
    VALID_PREFIXES
        .iter()
        .any(|prefix| unsigned.len() > prefix.len() && unsigned.starts_with(prefix))
}

pub fn is_table_layout_class(base: &str) -> bool {
    TABLE_LAYOUT_EXACT.contains(&base)
        || TABLE_LAYOUT_PREFIXES
            .iter()
            .any(|prefix| base.starts_with(prefix))
}

pub fn is_layout_class(base: &str) -> bool {
    LAYOUT_EXACT.contains(&base)
        || LAYOUT_PREFIXES
            .iter()
            .any(|prefix| base.len() > prefix.len() && base.starts_with(prefix))
}

/// `group`, `peer` and `peer/<id>` only establish selector relationships.
pub fn is_marker_class(value: &str) -> bool {
    match value {
        "group" | "peer" => true,
        _ => value
            .strip_prefix("peer/")
            .is_some_and(|id| !id.is_empty()),
    }
}

fn strip_negative(base: &str) -> &str {
    match base.strip_prefix('-') {
        Some(rest) if !rest.is_empty() && !rest.starts_with('-') => rest,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_layout_class, is_marker_class, is_table_layout_class, is_valid_class};

    #[test]
    fn accepts_exact_and_prefixed_utilities() {
        assert!(is_valid_class("flex"));
        assert!(is_valid_class("p-4"));
        assert!(is_valid_class("bg-red-500"));
        assert!(is_valid_class("rounded-lg"));
        assert!(is_valid_class("-mt-2"));
        assert!(!is_valid_class("not-a-class"));
        assert!(!is_valid_class("p-"));
        assert!(!is_valid_class(""));
    }

    #[test]
    fn accepts_any_balanced_arbitrary_value() {
        assert!(is_valid_class("w-[37px]"));
        assert!(is_valid_class("[mask-type:luminance]"));
        assert!(is_valid_class("whatever-[x]"));
        assert!(!is_valid_class("whatever-[x"));
    }

    #[test]
    fn rejects_table_layout_utilities() {
        assert!(!is_valid_class("table"));
        assert!(!is_valid_class("table-cell"));
        assert!(!is_valid_class("border-collapse"));
        assert!(!is_valid_class("border-spacing-2"));
        assert!(is_table_layout_class("border-spacing-x-4"));
        assert!(is_valid_class("border-2"));
    }

    #[test]
    fn classifies_layout_utilities() {
        assert!(is_layout_class("flex"));
        assert!(is_layout_class("gap-4"));
        assert!(is_layout_class("justify-between"));
        assert!(!is_layout_class("bg-red-500"));
        assert!(!is_layout_class("p-4"));
    }

    #[test]
    fn recognizes_marker_classes() {
        assert!(is_marker_class("group"));
        assert!(is_marker_class("peer"));
        assert!(is_marker_class("peer/input"));
        assert!(!is_marker_class("peer/"));
        assert!(!is_marker_class("peers"));
        assert!(!is_marker_class("group-hover"));
    }
}
