//! Word-wrapped documentation comments.

/// Right margin of generated doc comments.
pub const DOC_MARGIN: usize = 80;

/// Formats `contents` as a `/** @tag ... */` block, indented by `indent`
/// spaces and wrapped so no line passes `margin` columns.
///
/// Returns `None` for blank contents. A single word longer than the
/// margin gets a line of its own rather than being split. Any `*/` inside
/// `contents` is written as `*\/` so the block cannot close early.
///
/// # Examples
///
/// ```
/// use classdef_codegen::docs::doc_comment;
///
/// let doc = doc_comment("brief", "Moves the light.", 2, 80).unwrap();
/// assert_eq!(doc, "  /**\n   * @brief Moves the light.\n   */");
/// ```
#[must_use]
pub fn doc_comment(tag: &str, contents: &str, indent: usize, margin: usize) -> Option<String> {
    if contents.trim().is_empty() {
        return None;
    }

    let pad = " ".repeat(indent);
    let width = margin.saturating_sub(indent);
    let tag_line = format!(" * @{tag}");

    let mut lines = vec![format!("{pad}/**")];
    let mut line = tag_line.clone();
    let mut has_words = false;

    for word in contents.split_whitespace() {
        let word = word.replace("*/", "*\\/");
        if has_words && line.len() + 1 + word.len() > width {
            lines.push(format!("{pad}{line}"));
            line = " *".to_string();
        }
        line.push(' ');
        line.push_str(&word);
        has_words = true;
    }
    lines.push(format!("{pad}{line}"));
    lines.push(format!("{pad} */"));

    Some(lines.join("\n"))
}
