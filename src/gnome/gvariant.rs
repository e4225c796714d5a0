//! Minimal handling of the GVariant text literals `gsettings` prints.
//!
//! Only the forms the tools actually exchange are covered: arrays of
//! strings (the `custom-keybindings` path list, builtin binding lists) and
//! single quoted strings (slot keys like `name`).  `gsettings get` prints
//! an empty string array with its type annotation, `@as []`, and a
//! populated one as `['…', '…']` with single quotes.

/// Error from parsing a GVariant literal.
#[derive(Debug, thiserror::Error)]
#[error("gvariant error: {0}")]
pub struct GVariantError(String);

/// Parse a string-array literal (`@as []`, `[]`, `['a', 'b']`).
pub fn parse_string_array(input: &str) -> Result<Vec<String>, GVariantError> {
    let mut body = input.trim();
    // Empty arrays carry a type annotation.
    if let Some(rest) = body.strip_prefix("@as") {
        body = rest.trim_start();
    }
    let body = body
        .strip_prefix('[')
        .and_then(|b| b.strip_suffix(']'))
        .ok_or_else(|| GVariantError(format!("expected a string array, got {:?}", input)))?;

    let mut items = Vec::new();
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => break,
            Some(c) if c.is_whitespace() || c == ',' => continue,
            Some('\'') => {
                let mut item = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(escaped) => item.push(escaped),
                            None => {
                                return Err(GVariantError(
                                    "unterminated escape in string array".into(),
                                ))
                            }
                        },
                        Some('\'') => break,
                        Some(c) => item.push(c),
                        None => {
                            return Err(GVariantError(
                                "unterminated string in string array".into(),
                            ))
                        }
                    }
                }
                items.push(item);
            }
            Some(c) => {
                return Err(GVariantError(format!(
                    "unexpected character {:?} in string array",
                    c
                )))
            }
        }
    }
    Ok(items)
}

/// Format a string array in the literal form `gsettings set` accepts.
pub fn format_string_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Strip the quotes from a string value as printed by `gsettings get`.
///
/// Values that are not quoted are returned trimmed and otherwise untouched,
/// so the helper is safe on both printed (`'flameshot'`) and bare
/// (`flameshot`) forms.
pub fn unquote(input: &str) -> String {
    let trimmed = input.trim();
    let inner = match trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        Some(inner) => inner,
        None => return trimmed.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
