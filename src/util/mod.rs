//
//  exonet-api
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! String helpers shared by the output and command modules.

use serde_json::Value;

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Renders an attribute value for display: strings without quotes, `null` as
/// `-`, lists comma-separated and everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Splits a `name=value` filter argument. A bare `name` means `name=1`.
pub fn parse_filter(arg: &str) -> (&str, Option<&str>) {
    match arg.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("example.com")), "example.com");
        assert_eq!(display_value(&json!(null)), "-");
        assert_eq!(display_value(&json!(3600)), "3600");
        assert_eq!(display_value(&json!(true)), "yes");
        assert_eq!(display_value(&json!(["ns1", "ns2"])), "ns1, ns2");
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("open"), ("open", None));
        assert_eq!(parse_filter("type=A"), ("type", Some("A")));
        assert_eq!(parse_filter("name=a=b"), ("name", Some("a=b")));
    }
}
