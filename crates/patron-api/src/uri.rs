// Positional URI template expansion.
//
// Upstream endpoints are configured as templates such as
// `https://host/paia/core/{id}/items`. Placeholders are matched by position,
// not by name: the first `{...}` takes the first value, and so on.

use std::fmt::{Display, Write};

/// Substitute the placeholders in `template` with `values`, in order.
///
/// Placeholders without a matching value are kept verbatim, surplus values
/// are ignored, and an unterminated `{` is copied as-is. The result is not
/// validated as a URL; that happens when the request is sent.
pub fn replace_placeholders<V: Display>(values: &[V], template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);

        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };

        let placeholder = &tail[..=close];
        match values.next() {
            Some(value) => {
                let _ = write!(out, "{value}");
            }
            None => out.push_str(placeholder),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}
