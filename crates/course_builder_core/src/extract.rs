//! crates/course_builder_core/src/extract.rs
//!
//! Best-effort location of a JSON object inside free-form model output.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static REASONING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("reasoning pattern is valid"));

/// Removes `<think>...</think>` sections that reasoning models prepend to
/// their answers.
pub fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK.replace_all(text, "").into_owned()
}

/// Parses the first JSON value that starts at the first `{` of `text`
/// (after reasoning blocks are removed). Anything after that value is ignored.
/// Returns `None` when there is no brace, the JSON is malformed, or the value
/// is not an object.
pub fn first_json_object(text: &str) -> Option<Value> {
    let cleaned = strip_reasoning(text);
    let start = cleaned.find('{')?;
    let mut values = serde_json::Deserializer::from_str(&cleaned[start..]).into_iter::<Value>();
    match values.next() {
        Some(Ok(value @ Value::Object(_))) => Some(value),
        _ => None,
    }
}
