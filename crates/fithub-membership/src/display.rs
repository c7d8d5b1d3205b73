/// Rendered in place of contact details a member left out.
pub const NOT_PROVIDED: &str = "Not provided";

/// Absent and blank values are shown as not provided.
pub fn or_not_provided(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_PROVIDED,
    }
}

/// Cut a value to `max` characters, marking the cut with `...`.
pub fn truncate_display(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let cut: String = value.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}
