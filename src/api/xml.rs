use serde_json::Value;

pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>\n";

/// # value to xml
/// write a json document as xml. the document is an object with one key, that key becomes
/// the root element. nested objects become child elements, everything else becomes text.
pub fn to_xml(document: &Value) -> String {
    let mut out = String::from(XML_DECLARATION);
    match document {
        Value::Object(map) => {
            for (key, value) in map {
                write_element(&mut out, key, value);
            }
        }
        other => write_text(&mut out, other),
    }
    out
}

fn write_element(out: &mut String, tag: &str, value: &Value) {
    if value.is_null() {
        out.push_str(&format!("<{} />", tag));
        return;
    }

    out.push_str(&format!("<{}>", tag));
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(out, key, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, "item", item);
            }
        }
        other => write_text(out, other),
    }
    out.push_str(&format!("</{}>", tag));
}

fn write_text(out: &mut String, value: &Value) {
    match value {
        Value::String(text) => out.push_str(&escape(text)),
        Value::Null => {}
        other => out.push_str(&escape(&other.to_string())),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
