//! # Field Resolution
//!
//! Works out which column of a row holds the slug and which holds the JSON
//! document. User CSVs name these columns inconsistently, so both lookups are
//! driven by lists of name rules, applied differently:
//!
//! - The slug comes from the best-ranked column: rules are tried in priority
//!   order and within one rule the leftmost matching column wins.
//! - The JSON comes from a left-to-right scan. Every column matching any rule
//!   is a candidate, and the first one holding an object-shaped value wins.

use crate::rows::Row;
use tracing::debug;

/// A named predicate over a lower-cased column name.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub name: &'static str,
    matches: fn(&str) -> bool,
}

impl ColumnRule {
    pub const fn new(name: &'static str, matches: fn(&str) -> bool) -> Self {
        Self { name, matches }
    }

    /// Tests the rule against a column name, ignoring case.
    pub fn matches(&self, column: &str) -> bool {
        (self.matches)(&column.to_lowercase())
    }
}

pub const SLUG_RULES: [ColumnRule; 3] = [
    ColumnRule::new("equals_slug", |c| c == "slug"),
    ColumnRule::new("contains_slug", |c| c.contains("slug")),
    ColumnRule::new("equals_name", |c| c == "name"),
];

// "contains_data" also matches columns like "payload_data" or "updated_data".
pub const JSON_RULES: [ColumnRule; 3] = [
    ColumnRule::new("equals_json", |c| c == "json"),
    ColumnRule::new("contains_json", |c| c.contains("json")),
    ColumnRule::new("contains_data", |c| c.contains("data")),
];

/// The slug and JSON text found in one row. Empty means "not found".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedFields {
    pub slug: String,
    pub json_text: String,
}

impl ResolvedFields {
    /// True when both a slug and JSON text were found.
    pub fn is_complete(&self) -> bool {
        !self.slug.is_empty() && !self.json_text.is_empty()
    }
}

/// A column that satisfied one of the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Name of the rule the column matched.
    pub rule: &'static str,
    pub column: &'a str,
    pub value: &'a str,
}

/// Returns the columns matching `rules`, best rule first. A column appears
/// once, under the first rule it satisfies.
pub fn ranked_candidates<'a>(row: &'a Row, rules: &[ColumnRule]) -> Vec<Candidate<'a>> {
    let columns: Vec<(&str, &str)> = row.iter().collect();
    let mut taken = vec![false; columns.len()];
    let mut candidates = Vec::new();

    for rule in rules {
        for (index, &(column, value)) in columns.iter().enumerate() {
            if !taken[index] && rule.matches(column) {
                taken[index] = true;
                candidates.push(Candidate {
                    rule: rule.name,
                    column,
                    value,
                });
            }
        }
    }
    candidates
}

/// Returns the columns matching any of `rules`, in column order.
pub fn positional_candidates<'a>(row: &'a Row, rules: &[ColumnRule]) -> Vec<Candidate<'a>> {
    row.iter()
        .filter_map(|(column, value)| {
            rules
                .iter()
                .find(|rule| rule.matches(column))
                .map(|rule| Candidate {
                    rule: rule.name,
                    column,
                    value,
                })
        })
        .collect()
}

/// Finds the slug for a row. The best-ranked column is used even if its value
/// is blank.
pub fn resolve_slug(row: &Row) -> String {
    match ranked_candidates(row, &SLUG_RULES).first() {
        Some(candidate) => {
            debug!(rule = candidate.rule, column = candidate.column, "Resolved slug column");
            candidate.value.trim().to_string()
        }
        None => String::new(),
    }
}

/// Finds the JSON text for a row, scanning matching columns left to right until
/// one holds something shaped like an object.
pub fn resolve_json(row: &Row) -> String {
    positional_candidates(row, &JSON_RULES)
        .into_iter()
        .find_map(|candidate| {
            let json_text = recover_json_shape(candidate.value)?;
            debug!(rule = candidate.rule, column = candidate.column, "Resolved JSON column");
            Some(json_text)
        })
        .unwrap_or_default()
}

pub fn resolve_fields(row: &Row) -> ResolvedFields {
    ResolvedFields {
        slug: resolve_slug(row),
        json_text: resolve_json(row),
    }
}

/// Accepts `{...}` verbatim, and unwraps a quoted `"{...}"` cell whose inner
/// quotes were doubled by CSV tooling. Anything else is rejected.
pub fn recover_json_shape(value: &str) -> Option<String> {
    let content = value.trim();
    if looks_like_object(content) {
        return Some(content.to_string());
    }

    let inner = content
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))?;
    if inner.starts_with('{') && inner.ends_with('}') {
        Some(inner.replace("\"\"", "\""))
    } else {
        None
    }
}

/// True when the text starts with `{` and ends with `}`.
pub fn looks_like_object(text: &str) -> bool {
    text.starts_with('{') && text.ends_with('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_slug_rule_priority_beats_position() {
        let r = row(&[
            ("Name", "Example"),
            ("Slug", "example-1"),
            ("JSON", r#"{"key":"value"}"#),
        ]);
        assert_eq!(resolve_slug(&r), "example-1");
    }

    #[test]
    fn test_slug_falls_back_to_contains_then_name() {
        let r = row(&[("Name", "by-name"), ("page_slug", " by-contains ")]);
        assert_eq!(resolve_slug(&r), "by-contains");

        let r = row(&[("title", "x"), ("NAME", "  by-name  ")]);
        assert_eq!(resolve_slug(&r), "by-name");
    }

    #[test]
    fn test_slug_leftmost_within_rule_and_blank_value_kept() {
        let r = row(&[("slug_a", "first"), ("slug_b", "second")]);
        assert_eq!(resolve_slug(&r), "first");

        // The best column wins even if it is blank; no fallback to "name".
        let r = row(&[("Name", "named"), ("slug", "   ")]);
        assert_eq!(resolve_slug(&r), "");
    }

    #[test]
    fn test_slug_missing() {
        let r = row(&[("title", "x"), ("json", "{}")]);
        assert_eq!(resolve_slug(&r), "");
    }

    #[test]
    fn test_json_rule_matching() {
        let r = row(&[("Payload Data", r#"{"a":1}"#)]);
        assert_eq!(resolve_json(&r), r#"{"a":1}"#);

        let r = row(&[("updated_data", r#"{"d":4}"#)]);
        assert_eq!(resolve_json(&r), r#"{"d":4}"#);
    }

    #[test]
    fn test_json_scan_follows_column_order() {
        let r = row(&[("json_blob", r#"{"b":2}"#), ("JSON", r#"{"c":3}"#)]);
        assert_eq!(resolve_json(&r), r#"{"b":2}"#);

        let r = row(&[("slug", "a"), ("metadata", r#"{"m":1}"#), ("json", r#"{"j":2}"#)]);
        assert_eq!(resolve_json(&r), r#"{"m":1}"#);
    }

    #[test]
    fn test_candidates_carry_rule_names() {
        let r = row(&[("Name", "n"), ("data", "{}"), ("Slug", "s"), ("json", "{}")]);

        let slugs = ranked_candidates(&r, &SLUG_RULES);
        let slug_rules: Vec<&str> = slugs.iter().map(|c| c.rule).collect();
        assert_eq!(slug_rules, vec!["equals_slug", "equals_name"]);

        let json = positional_candidates(&r, &JSON_RULES);
        let json_columns: Vec<(&str, &str)> = json.iter().map(|c| (c.column, c.rule)).collect();
        assert_eq!(
            json_columns,
            vec![("data", "contains_data"), ("json", "equals_json")]
        );
    }

    #[test]
    fn test_json_skips_unshaped_candidates() {
        let r = row(&[("json", "not json"), ("metadata", r#" {"ok":true} "#)]);
        assert_eq!(resolve_json(&r), r#"{"ok":true}"#);

        let r = row(&[("json", "[1,2]"), ("data", "plain")]);
        assert_eq!(resolve_json(&r), "");
    }

    #[test]
    fn test_recover_quoted_json() {
        assert_eq!(
            recover_json_shape(r#""{""key"":""value""}""#).as_deref(),
            Some(r#"{"key":"value"}"#)
        );
        assert_eq!(recover_json_shape(r#""{}""#).as_deref(), Some("{}"));
        assert_eq!(recover_json_shape(r#""{"#), None);
        assert_eq!(recover_json_shape(r#""value""#), None);
        assert_eq!(recover_json_shape(""), None);
    }

    #[test]
    fn test_resolve_fields_completeness() {
        let fields = resolve_fields(&row(&[("slug", "a"), ("json", "{}")]));
        assert!(fields.is_complete());
        let fields = resolve_fields(&row(&[("slug", "a"), ("json", "")]));
        assert!(!fields.is_complete());
    }
}
