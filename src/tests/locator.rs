// Unit Tests for Element Locators
//
// UNIT UNDER TEST: Locator, Step::to_query, xpath_literal
//
// BUSINESS RESPONSIBILITY:
//   - Compiles test-id, role and CSS locators into WebDriver queries
//   - Matches accessible names case-insensitively
//   - Chains steps so descendants are searched inside their container
//
// TEST COVERAGE:
//   - Query strategy selection per selector kind
//   - Quoting of names containing apostrophes
//   - CSS string quoting of test ids
//   - Display format used in error messages

use crate::ui::locator::{css_string, xpath_literal, Locator, Strategy};

#[cfg(test)]
mod query_compilation_tests {
    use super::*;

    #[test]
    fn test_test_id_compiles_to_css() {
        let locator = Locator::test_id("search-input");

        let query = locator.steps()[0].to_query();

        assert_eq!(query.strategy, Strategy::Css);
        assert_eq!(query.value, "[data-testid=\"search-input\"]");
        assert!(query.text_filter.is_none());
    }

    #[test]
    fn test_test_id_with_text_switches_to_xpath() {
        let locator = Locator::test_id("country-card").filter_text("Japan");

        let query = locator.steps()[0].to_query();

        assert_eq!(query.strategy, Strategy::XPath);
        assert!(query.value.starts_with(".//*[@data-testid='country-card']"));
        assert!(query.value.contains("'japan'"));
    }

    #[test]
    fn test_role_named_matches_lowercased_name() {
        // Arrange
        let locator = Locator::role_named("button", "ACCEPT");

        // Act
        let query = locator.steps()[0].to_query();

        // Assert
        assert_eq!(query.strategy, Strategy::XPath);
        assert!(query.value.contains("self::button"));
        assert!(query.value.contains("@role='button'"));
        assert!(query.value.contains("'accept'"));
        assert!(query.value.contains("@aria-label"));
    }

    #[test]
    fn test_role_name_with_apostrophe_is_double_quoted() {
        let locator = Locator::role_named("button", "DON'T ALLOW");

        let query = locator.steps()[0].to_query();

        assert!(query.value.contains("\"don't allow\""));
    }

    #[test]
    fn test_unknown_role_uses_explicit_attribute_only() {
        let query = Locator::role("dialog").steps()[0].to_query();

        assert_eq!(query.value, ".//*[@role='dialog']");
    }

    #[test]
    fn test_css_with_text_keeps_filter_for_driver() {
        let query = Locator::css("li.country").filter_text("Japan").steps()[0].to_query();

        assert_eq!(query.strategy, Strategy::Css);
        assert_eq!(query.value, "li.country");
        assert_eq!(query.text_filter.as_deref(), Some("Japan"));
    }
}

#[cfg(test)]
mod locator_chaining_tests {
    use super::*;

    #[test]
    fn test_locate_appends_steps_in_order() {
        let locator = Locator::role_named("link", "VALIDITY 7 Days")
            .locate(Locator::role_named("button", "BUY NOW"));

        assert_eq!(locator.steps().len(), 2);
        assert_eq!(
            locator.to_string(),
            "role=link[name=\"VALIDITY 7 Days\"] >> role=button[name=\"BUY NOW\"]"
        );
    }

    #[test]
    fn test_filter_text_applies_to_last_step() {
        let locator = Locator::test_id("list")
            .locate(Locator::role("listitem"))
            .filter_text("Japan");

        assert!(locator.steps()[0].has_text.is_none());
        assert_eq!(locator.steps()[1].has_text.as_deref(), Some("Japan"));
        assert_eq!(
            locator.to_string(),
            "test_id=list >> role=listitem[has_text=\"Japan\"]"
        );
    }
}

#[cfg(test)]
mod xpath_literal_tests {
    use super::*;

    #[test]
    fn test_plain_and_single_quoted_values() {
        assert_eq!(xpath_literal("japan"), "'japan'");
        assert_eq!(xpath_literal("don't"), "\"don't\"");
    }

    #[test]
    fn test_both_quote_kinds_use_concat() {
        let literal = xpath_literal(r#"say "don't""#);

        assert_eq!(literal, r#"concat('say "don', "'", 't"')"#);
    }
}

#[cfg(test)]
mod css_string_tests {
    use super::*;

    #[test]
    fn test_escapes_quotes_and_backslashes_only() {
        assert_eq!(css_string("search-input"), "\"search-input\"");
        assert_eq!(css_string(r#"a"b\c"#), r#""a\"b\\c""#);
        // Non-ASCII passes through unescaped
        assert_eq!(css_string("prix-€"), "\"prix-€\"");
    }

    #[test]
    fn test_test_id_selector_uses_css_quoting() {
        let query = Locator::test_id("caf\u{e9}\t").steps()[0].to_query();

        assert_eq!(query.value, "[data-testid=\"caf\u{e9}\t\"]");
    }
}
