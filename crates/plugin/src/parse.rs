//! Shared ID-list parsing for the command surface.
//!
//! Every multi-value argument is a comma-separated string (ASCII `,` or
//! full-width `，`), with `~` standing in for the current session's
//! contextual group or user ID.

/// Placeholder token meaning "the current conversation's group, or else the
/// invoking user".
pub const PLACEHOLDER: &str = "~";

/// Split a raw target list into trimmed elements. Keeps every element,
/// including invalid ones — the caller reports those per element.
#[must_use]
pub fn split_targets(input: &str) -> Vec<String> {
    input
        .split([',', '，'])
        .map(|s| s.trim().to_string())
        .collect()
}

/// Substitute the placeholder token with the contextual ID.
#[must_use]
pub fn resolve_placeholder(id: &str, contextual_id: &str) -> String {
    if id == PLACEHOLDER {
        contextual_id.to_string()
    } else {
        id.to_string()
    }
}

/// An ID is valid when non-empty and numeric (signed 64-bit; group ids can
/// be negative on some platforms).
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.parse::<i64>().is_ok()
}

/// Parse a secondary ID list (forwarded groups/users, bypassed users):
/// split, trim, resolve the placeholder against `contextual_id`, and
/// silently drop anything that fails numeric validation. A placeholder with
/// no contextual ID available (group list outside a group) is dropped too.
#[must_use]
pub fn parse_id_list(input: &str, contextual_id: Option<&str>) -> Vec<String> {
    input
        .split([',', '，'])
        .filter_map(|raw| {
            let id = raw.trim();
            let resolved = if id == PLACEHOLDER {
                contextual_id?.to_string()
            } else {
                id.to_string()
            };
            is_valid_id(&resolved).then_some(resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("123456", true)]
    #[case("-100123", true)]
    #[case("", false)]
    #[case("~", false)]
    #[case("12ab", false)]
    #[case("1.5", false)]
    fn valid_id(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_id(input), expected);
    }

    #[rstest]
    #[case("1,2,3", vec!["1", "2", "3"])]
    #[case("1，2，3", vec!["1", "2", "3"])]
    #[case("1, 2 ,3", vec!["1", "2", "3"])]
    #[case("1,,2", vec!["1", "", "2"])]
    fn split(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_targets(input), expected);
    }

    #[test]
    fn placeholder_resolution() {
        assert_eq!(resolve_placeholder("~", "100"), "100");
        assert_eq!(resolve_placeholder("123", "100"), "123");
    }

    #[test]
    fn id_list_drops_invalid_silently() {
        assert_eq!(
            parse_id_list("100,abc,200", Some("999")),
            ["100", "200"]
        );
    }

    #[test]
    fn id_list_resolves_placeholder() {
        assert_eq!(
            parse_id_list("100,~", Some("999")),
            ["100", "999"]
        );
    }

    #[test]
    fn id_list_drops_placeholder_without_context() {
        assert_eq!(parse_id_list("100,~", None), ["100"]);
    }

    #[test]
    fn id_list_full_width_comma() {
        assert_eq!(parse_id_list("100，200", Some("1")), ["100", "200"]);
    }
}
