//! Query string readers
//!
//! Each reader takes the decoded query map (for example from
//! `Query<HashMap<String, String>>`). The plain readers fall back to a zero
//! value when the key is missing, empty or unparsable; the `_optional`
//! variants return `None` instead.

use std::collections::HashMap;

fn non_empty<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str).filter(|value| !value.is_empty())
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

pub fn read_query_int_optional(query: &HashMap<String, String>, key: &str) -> Option<i64> {
    non_empty(query, key)?.parse().ok()
}

pub fn read_query_int(query: &HashMap<String, String>, key: &str) -> i64 {
    read_query_int_optional(query, key).unwrap_or_default()
}

pub fn read_query_bool_optional(query: &HashMap<String, String>, key: &str) -> Option<bool> {
    non_empty(query, key).and_then(parse_bool)
}

pub fn read_query_bool(query: &HashMap<String, String>, key: &str) -> bool {
    read_query_bool_optional(query, key).unwrap_or_default()
}

pub fn read_query_string_optional(query: &HashMap<String, String>, key: &str) -> Option<String> {
    non_empty(query, key).map(str::to_owned)
}

pub fn read_query_string(query: &HashMap<String, String>, key: &str) -> String {
    read_query_string_optional(query, key).unwrap_or_default()
}

/// Comma-separated list with each element trimmed; empty elements are kept
pub fn read_query_array_optional(query: &HashMap<String, String>, key: &str) -> Option<Vec<String>> {
    non_empty(query, key).map(|value| value.split(',').map(|part| part.trim().to_owned()).collect())
}

pub fn read_query_array(query: &HashMap<String, String>, key: &str) -> Vec<String> {
    read_query_array_optional(query, key).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn ints() {
        let q = query(&[("page", "3"), ("offset", "-20"), ("limit", "ten"), ("empty", "")]);
        assert_eq!(read_query_int(&q, "page"), 3);
        assert_eq!(read_query_int(&q, "offset"), -20);
        assert_eq!(read_query_int(&q, "limit"), 0);
        assert_eq!(read_query_int(&q, "empty"), 0);
        assert_eq!(read_query_int(&q, "missing"), 0);

        assert_eq!(read_query_int_optional(&q, "page"), Some(3));
        assert_eq!(read_query_int_optional(&q, "limit"), None);
    }

    #[test]
    fn bools() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(read_query_bool(&query(&[("archived", value)]), "archived"), "{value}");
        }
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(
                read_query_bool_optional(&query(&[("archived", value)]), "archived"),
                Some(false),
                "{value}"
            );
        }

        let q = query(&[("archived", "yes")]);
        assert!(!read_query_bool(&q, "archived"));
        assert_eq!(read_query_bool_optional(&q, "archived"), None);
        assert_eq!(read_query_bool_optional(&q, "missing"), None);
    }

    #[test]
    fn strings() {
        let q = query(&[("sort", "desc"), ("search", "")]);
        assert_eq!(read_query_string(&q, "sort"), "desc");
        assert_eq!(read_query_string(&q, "search"), "");
        assert_eq!(read_query_string_optional(&q, "search"), None);
    }

    #[test]
    fn arrays() {
        let q = query(&[("tags", "user, admin ,guest"), ("ids", "1,,2")]);
        assert_eq!(read_query_array(&q, "tags"), ["user", "admin", "guest"]);
        assert_eq!(read_query_array(&q, "ids"), ["1", "", "2"]);
        assert!(read_query_array(&q, "missing").is_empty());
        assert_eq!(read_query_array_optional(&q, "missing"), None);
    }
}
