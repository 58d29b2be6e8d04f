use serde_json::Value;

pub type Strategy = fn(&Value) -> Option<&Value>;

/// Order matters.
pub const STRATEGIES: [(&str, Strategy); 2] = [
    ("choices[0].message.content", first_choice_content),
    ("generated_text", generated_text),
];

fn first_choice_content(response: &Value) -> Option<&Value> {
    response.get("choices")?.get(0)?.get("message")?.get("content")
}

fn generated_text(response: &Value) -> Option<&Value> {
    response.get("generated_text")
}

/// Tries [`STRATEGIES`] in order, first non-null value wins. Falls back to the
/// whole response serialized.
pub fn extract_text(response: &Value) -> Box<str> {
    for (name, strategy) in STRATEGIES {
        if let Some(value) = strategy(response).filter(|value| !value.is_null()) {
            tracing::debug!("Extracted completion text from {name}");
            return text_of(value);
        }
    }
    tracing::warn!("No known text field in provider response, returning it whole");
    response.to_string().into()
}

fn text_of(value: &Value) -> Box<str> {
    match value {
        Value::String(text) => text.as_str().into(),
        other => other.to_string().into(),
    }
}
