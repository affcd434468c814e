// ── Widget list sanitization ──

use std::collections::HashSet;

use serde_json::Value;

/// Turns an untrusted widget list into clean, ordered widget identifiers.
pub trait WidgetSanitizer {
    fn sanitize(&self, widgets: &[Value]) -> Vec<String>;
}

/// Default sanitizer.
///
/// Keeps string and integer entries, trimmed. Drops empty entries,
/// identifiers with characters outside `[A-Za-z0-9_-]`, and repeats (first
/// occurrence wins). With an allow-list, unknown identifiers are dropped too.
#[derive(Debug, Clone, Default)]
pub struct WidgetSanitization {
    allowed: Option<HashSet<String>>,
}

impl WidgetSanitization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept the given widget identifiers.
    pub fn with_allowed<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(allowed.into_iter().map(Into::into).collect()),
        }
    }

    fn is_identifier(widget: &str) -> bool {
        !widget.is_empty()
            && widget
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    fn is_allowed(&self, widget: &str) -> bool {
        self.allowed.as_ref().is_none_or(|a| a.contains(widget))
    }
}

impl WidgetSanitizer for WidgetSanitization {
    fn sanitize(&self, widgets: &[Value]) -> Vec<String> {
        let mut seen = HashSet::new();
        widgets
            .iter()
            .filter_map(|w| match w {
                Value::String(s) => Some(s.trim().to_owned()),
                Value::Number(n) => n.as_i64().map(|i| i.to_string()),
                _ => None,
            })
            .filter(|w| Self::is_identifier(w) && self.is_allowed(w))
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(v: Value) -> Vec<Value> {
        match v {
            Value::Array(items) => items,
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn keeps_order_and_trims() {
        let out = WidgetSanitization::new().sanitize(&values(json!([" loans", "search ", "news"])));
        assert_eq!(out, vec!["loans", "search", "news"]);
    }

    #[test]
    fn drops_garbage_entries() {
        let out = WidgetSanitization::new().sanitize(&values(json!([
            "loans", "", "<script>", null, true, { "id": "x" }, 1.5, 42, "a b"
        ])));
        assert_eq!(out, vec!["loans", "42"]);
    }

    #[test]
    fn drops_repeats() {
        let out = WidgetSanitization::new().sanitize(&values(json!(["a", "b", "a", " b"])));
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn allow_list_filters_unknown() {
        let sanitizer = WidgetSanitization::with_allowed(["loans", "reservations"]);
        let out = sanitizer.sanitize(&values(json!(["reservations", "ads", "loans"])));
        assert_eq!(out, vec!["reservations", "loans"]);
    }
}
