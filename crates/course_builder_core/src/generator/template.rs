//! crates/course_builder_core/src/generator/template.rs
//!
//! Placeholder substitution and escaping shared by the file renderers.

use std::collections::HashMap;

/// Substitutes `{{name}}` placeholders in one pass. Substituted values are
/// never rescanned, and unknown names are left as they are.
pub fn render(template: &str, params: &[(&str, String)]) -> String {
    let lookup: HashMap<&str, &str> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let mut out = String::with_capacity(template.len() + template.len() / 4);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match lookup.get(name.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `text` as a JavaScript string literal.
pub fn js_string(text: &str) -> String {
    // A JSON string is a valid JS string literal; the two line separators
    // are escaped as well because older engines reject them raw.
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Markdown bullet list, or a placeholder line when empty.
pub fn bullet_list<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {}", empty);
    }
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
