/// Shortest text that parses back to `d`, always with a fraction or an
/// exponent so it reads back as a Double. Non-finite values have no JSON
/// form and print as `null`.
pub(crate) fn format_double(d: f64) -> String {
    if d.is_finite() {
        format!("{d:?}")
    } else {
        "null".to_owned()
    }
}

/// Parses integer text, falling back to a Double when it does not fit in
/// an `i64`.
pub(crate) fn parse_int_text(text: &str) -> Option<super::Value> {
    match text.parse::<i64>() {
        Ok(i) => Some(super::Value::Integer(i)),
        Err(_) => text.parse::<f64>().ok().map(super::Value::Double),
    }
}
