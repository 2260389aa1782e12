use serde_json::Value;

/// Parse one cell as a literal. The grammar is JSON plus the Python
/// spellings upstream exports use: bare `None`/`True`/`False` tokens and
/// tuple parentheses, so `(1, 2)` reads as a 2-sequence. Anything else
/// yields `None`.
pub fn parse_literal(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }
    serde_json::from_str(&normalize_python(trimmed)).ok()
}

/// Parse one cell as a sequence literal.
pub fn parse_sequence(raw: &str) -> Option<Vec<Value>> {
    match parse_literal(raw)? {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Render one sequence element into an output cell. Strings drop their
/// quotes, `null` becomes the empty cell, everything else keeps its JSON
/// text (so a nested sequence stays compact JSON).
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rewrite Python literal spellings into JSON. Double-quoted string
/// contents pass through untouched; single-quoted strings are not part of
/// the grammar.
fn normalize_python(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '(' => out.push('['),
            ')' => out.push(']'),
            _ if c.is_ascii_alphabetic() => {
                let mut word = String::new();
                word.push(c);
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        word.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "None" => out.push_str("null"),
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    _ => out.push_str(&word),
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_sequences() {
        assert_eq!(
            parse_sequence("[1, 2, 3]"),
            Some(vec![json!(1), json!(2), json!(3)])
        );
        assert_eq!(
            parse_sequence("[0.5, -1.25]"),
            Some(vec![json!(0.5), json!(-1.25)])
        );
    }

    #[test]
    fn parses_python_spellings() {
        assert_eq!(parse_sequence("(1, 2)"), Some(vec![json!(1), json!(2)]));
        assert_eq!(
            parse_sequence("[True, False, None]"),
            Some(vec![json!(true), json!(false), Value::Null])
        );
    }

    #[test]
    fn parses_nested_sequences() {
        assert_eq!(
            parse_sequence("[[1, 2], [3, 4]]"),
            Some(vec![json!([1, 2]), json!([3, 4])])
        );
        assert_eq!(
            parse_sequence("((1, 2), (3, 4))"),
            Some(vec![json!([1, 2]), json!([3, 4])])
        );
    }

    #[test]
    fn scalars_are_literals_but_not_sequences() {
        assert_eq!(parse_literal("42"), Some(json!(42)));
        assert_eq!(parse_literal("True"), Some(json!(true)));
        assert_eq!(parse_sequence("42"), None);
        assert_eq!(parse_sequence("\"[not a list]\""), None);
    }

    #[test]
    fn rejects_malformed_and_plain_text() {
        assert_eq!(parse_literal(""), None);
        assert_eq!(parse_literal("   "), None);
        assert_eq!(parse_literal("[1, 2"), None);
        assert_eq!(parse_literal("hello world"), None);
        assert_eq!(parse_literal("12.3.4"), None);
    }

    #[test]
    fn string_contents_survive_normalization() {
        // the outer parens force the Python path; the parens and keyword
        // lookalike inside the string must not be touched
        assert_eq!(
            parse_sequence("(\"None (really)\", True)"),
            Some(vec![json!("None (really)"), json!(true)])
        );
    }

    #[test]
    fn renders_elements_as_output_cells() {
        assert_eq!(render_scalar(&json!(1)), "1");
        assert_eq!(render_scalar(&json!(-0.5)), "-0.5");
        assert_eq!(render_scalar(&json!("abc")), "abc");
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&Value::Null), "");
        assert_eq!(render_scalar(&json!([1, 2])), "[1,2]");
    }
}
