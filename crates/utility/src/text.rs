/// Parses a floating point CSV field. Empty fields, `NaN` and infinities
/// yield `None`.
pub fn parse_optional_f64(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Makes an arbitrary value (vessel category, identifier) usable as a single
/// path component.
pub fn path_component(value: &str) -> String {
    let cleaned = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect::<String>();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "unknown".to_owned()
    } else {
        cleaned
    }
}
