//! Identifier rewrite rules.
//!
//! Two rules run in order on every identifier:
//! 1. underscore prefix: `_foo` → `m_foo`
//! 2. camel case: `item_index` → `ItemIndex`, `a_item_index` → `a_ItemIndex`
//!
//! Both work on a single identifier and return `None` when it is left alone.
//! The lexical and text modes feed them the same character runs (Unicode
//! alphanumerics and `_`); they differ only in which runs they visit.

use crate::config::RenamerConfig;

/// Marker inserted before identifiers that start with an underscore.
pub const MEMBER_UNDERSCORE_PREFIX: &str = "m";

/// Uppercase the first character, leave the rest unchanged.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

/// `_foo` → `m_foo`, `_` → `m_`.
///
/// Not filtered by the ignore list.
pub fn prefix_underscore(identifier: &str) -> Option<String> {
    if identifier.starts_with('_') {
        Some(format!("{}{}", MEMBER_UNDERSCORE_PREFIX, identifier))
    } else {
        None
    }
}

/// Whether the camel-case rule looks at this identifier at all.
pub fn is_camel_case_candidate(identifier: &str, config: &RenamerConfig) -> bool {
    let Some(first) = identifier.chars().next() else {
        return false;
    };

    identifier.contains('_')
        && !first.is_uppercase()
        && !first.is_ascii_digit()
        && !config.is_ignored(identifier)
}

/// Camel-case an underscore-separated identifier.
///
/// The first part decides the head: the member marker yields `m_`, the
/// argument marker yields `a_`, anything else is capitalized. Every remaining
/// part is capitalized and appended without a separator, so
/// `m_foo_bar` → `m_FooBar` and `m_` → `m_`.
pub fn camel_case(identifier: &str, config: &RenamerConfig) -> Option<String> {
    if !is_camel_case_candidate(identifier, config) {
        return None;
    }

    let mut parts = identifier.split('_');
    let head = parts.next()?;

    let mut result = if head == config.member_prefix_marker
        || head == config.argument_prefix_marker
    {
        format!("{}_", head)
    } else {
        capitalize(head)
    };

    for part in parts {
        result.push_str(&capitalize(part));
    }

    (result != identifier).then_some(result)
}

/// Apply every enabled rule to one identifier.
pub fn rewrite_identifier(identifier: &str, config: &RenamerConfig) -> Option<String> {
    let prefixed = prefix_underscore(identifier);
    let current = prefixed.as_deref().unwrap_or(identifier);

    let camel = if config.camel_case {
        camel_case(current, config)
    } else {
        None
    };

    camel.or(prefixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenamerConfig {
        RenamerConfig::default()
    }

    #[test]
    fn capitalize_works() {
        assert_eq!(capitalize("item"), "Item");
        assert_eq!(capitalize("iTEM"), "ITEM");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
    }

    #[test]
    fn prefix_underscore_rules() {
        assert_eq!(prefix_underscore("_foo").as_deref(), Some("m_foo"));
        assert_eq!(prefix_underscore("_").as_deref(), Some("m_"));
        assert_eq!(prefix_underscore("__LINE__").as_deref(), Some("m__LINE__"));
        assert_eq!(prefix_underscore("foo_"), None);
        assert_eq!(prefix_underscore("foo"), None);
    }

    #[test]
    fn camel_case_plain_identifier() {
        assert_eq!(camel_case("item_index", &config()).as_deref(), Some("ItemIndex"));
        assert_eq!(
            camel_case("get_location_of_next_instruction", &config()).as_deref(),
            Some("GetLocationOfNextInstruction")
        );
    }

    #[test]
    fn camel_case_member_marker_keeps_following_part() {
        assert_eq!(camel_case("m_count", &config()).as_deref(), Some("m_Count"));
        assert_eq!(camel_case("m_foo_bar", &config()).as_deref(), Some("m_FooBar"));
    }

    #[test]
    fn camel_case_argument_marker() {
        assert_eq!(camel_case("a_item_index", &config()).as_deref(), Some("a_ItemIndex"));
    }

    #[test]
    fn bare_marker_is_left_as_prefix() {
        assert_eq!(camel_case("m_", &config()), None);
        assert_eq!(camel_case("a_", &config()), None);
    }

    #[test]
    fn camel_case_skips_non_candidates() {
        assert_eq!(camel_case("count", &config()), None);
        assert_eq!(camel_case("MAX_SIZE", &config()), None);
        assert_eq!(camel_case("Item_index", &config()), None);
        assert_eq!(camel_case("find_if", &config()), None);
        assert_eq!(camel_case("c_str", &config()), None);
        assert_eq!(camel_case("1_000", &config()), None);
    }

    #[test]
    fn camel_case_consecutive_and_trailing_underscores() {
        assert_eq!(camel_case("foo__bar", &config()).as_deref(), Some("FooBar"));
        assert_eq!(camel_case("line_", &config()).as_deref(), Some("Line"));
        assert_eq!(camel_case("m__LINE__", &config()).as_deref(), Some("m_LINE"));
    }

    #[test]
    fn camel_case_respects_custom_markers() {
        let config = RenamerConfig {
            member_prefix_marker: "my".to_string(),
            argument_prefix_marker: "p".to_string(),
            ..RenamerConfig::default()
        };
        assert_eq!(camel_case("my_value", &config).as_deref(), Some("my_Value"));
        assert_eq!(camel_case("p_value_x", &config).as_deref(), Some("p_ValueX"));
        assert_eq!(camel_case("m_value", &config).as_deref(), Some("MValue"));
    }

    #[test]
    fn camel_case_is_stable_on_own_output() {
        for ident in ["m_Count", "a_ItemIndex", "m_FooBar", "m_LINE", "m_"] {
            assert_eq!(camel_case(ident, &config()), None, "{} changed", ident);
        }
    }

    #[test]
    fn rewrite_identifier_chains_rules() {
        assert_eq!(rewrite_identifier("_count", &config()).as_deref(), Some("m_Count"));
        assert_eq!(rewrite_identifier("_", &config()).as_deref(), Some("m_"));
        assert_eq!(rewrite_identifier("plain", &config()), None);
    }

    #[test]
    fn rewrite_identifier_prefix_only() {
        let config = RenamerConfig {
            camel_case: false,
            ..RenamerConfig::default()
        };
        assert_eq!(rewrite_identifier("_count", &config).as_deref(), Some("m_count"));
        assert_eq!(rewrite_identifier("item_index", &config), None);
    }

    #[test]
    fn prefix_ignores_the_ignore_list() {
        let mut config = config();
        config.ignored_identifiers.insert("_reserved".to_string());
        assert_eq!(rewrite_identifier("_reserved", &config).as_deref(), Some("m_Reserved"));
    }
}
