//! Configuration template for `kb init`.
//!
//! The template is stored as valid TOML and returned as a commented-out example, with an
//! optional live `[content]` section appended.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the local configuration template.
///
/// When `content_path` is given, an uncommented `[content]` section pointing at it is
/// appended so the resulting file is immediately usable.
pub fn local_template(content_path: Option<&str>) -> String {
    let mut result = comment_template(LOCAL_TEMPLATE);
    if let Some(path) = content_path {
        result.push_str("\n[content]\n");
        result.push_str(&format!("path = {}\n", toml_string(path)));
    }
    result
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

/// Quotes a string as a TOML basic string.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
